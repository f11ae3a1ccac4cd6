// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Platform tags: where a model's files run.
//!
//! `platform:<p>` means a file for `p` ships with the model.
//! `platform:<p>-compatible` means the model can run on `p`, either because a
//! file ships for it or because its architecture converts to it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Pytorch,
    Onnx,
    Ncnn,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Pytorch => "pytorch",
            Platform::Onnx => "onnx",
            Platform::Ncnn => "ncnn",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File format of a downloadable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Pth,
    Onnx,
}

impl ResourceKind {
    pub fn platform(self) -> Platform {
        match self {
            ResourceKind::Pth => Platform::Pytorch,
            ResourceKind::Onnx => Platform::Onnx,
        }
    }
}

/// A downloadable model file. Only its format matters for search; urls,
/// hashes and sizes are ignored when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
}

/// Platforms an architecture can be converted to. Architecture names are
/// matched exactly; unknown ones convert to nothing.
pub fn compatible_platforms(architecture: &str) -> &'static [Platform] {
    use Platform::{Ncnn, Onnx, Pytorch};
    match architecture {
        "ESRGAN" | "Compact" => &[Pytorch, Onnx, Ncnn],
        "SwinIR" => &[Pytorch, Onnx],
        "CAIN" | "CAIN YUV" | "SPSR" | "ESRGAN+" | "SOFVSR" | "RIFE" | "EDSR (SRResNet)"
        | "2C2-ESRGAN" => &[Pytorch],
        _ => &[],
    }
}

/// `platform:*` tags for a model's architecture and shipped files.
pub fn platform_tags(architecture: &str, resources: &[Resource]) -> BTreeSet<String> {
    let shipped: BTreeSet<Platform> = resources.iter().map(|r| r.kind.platform()).collect();

    let mut tags: BTreeSet<String> = shipped.iter().map(|p| format!("platform:{p}")).collect();
    tags.extend(
        shipped
            .iter()
            .chain(compatible_platforms(architecture))
            .map(|p| format!("platform:{p}-compatible")),
    );
    tags
}
