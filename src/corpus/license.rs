// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! License tags.
//!
//! A record's license is an SPDX expression, possibly a choice (`MIT OR
//! Apache-2.0`). Each known id carries the permissions it grants and the
//! conditions it imposes, modelled on choosealicense.com. Tags:
//!
//! | Tag                     | When |
//! |-------------------------|------|
//! | `license:no-license`    | no license given |
//! | `license:unknown`       | some id isn't in the table |
//! | `license:commercial`    | any known choice allows commercial use |
//! | `license:modifications` | any known choice allows modifications |
//! | `license:by`            | every known choice requires attribution |
//! | `license:sa`            | every known choice requires share-alike |
//!
//! The licensee picks one choice, so permissions are unioned over the choices
//! and conditions intersected.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static OR_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+OR\s+").expect("OR separator is a valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    CommercialUse,
    Modifications,
    PrivateUse,
    PatentUse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Requirement {
    IncludeCopyright,
    DiscloseSource,
    SameLicense,
    StateChanges,
}

/// What a license allows and what it asks for in return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LicenseProperties {
    pub name: &'static str,
    pub permissions: &'static [Permission],
    pub conditions: &'static [Requirement],
}

use Permission::{CommercialUse, Modifications, PatentUse, PrivateUse};
use Requirement::{DiscloseSource, IncludeCopyright, SameLicense, StateChanges};

const PERMISSIVE: &[Permission] = &[CommercialUse, Modifications, PrivateUse];
const NON_COMMERCIAL: &[Permission] = &[Modifications, PrivateUse];

/// The properties of SPDX license `id`, if it's one we know. Ids are
/// case-sensitive.
pub fn known_license(id: &str) -> Option<&'static LicenseProperties> {
    let properties: &'static LicenseProperties = match id {
        "Apache-2.0" => &LicenseProperties {
            name: "Apache License 2.0",
            permissions: &[CommercialUse, Modifications, PrivateUse, PatentUse],
            conditions: &[IncludeCopyright, StateChanges],
        },
        "BSD-3-Clause" => &LicenseProperties {
            name: "BSD 3-Clause \"New\" or \"Revised\" License",
            permissions: PERMISSIVE,
            conditions: &[IncludeCopyright],
        },
        "CC-BY-4.0" => &LicenseProperties {
            name: "CC BY 4.0",
            permissions: PERMISSIVE,
            conditions: &[IncludeCopyright, StateChanges],
        },
        "CC-BY-SA-4.0" => &LicenseProperties {
            name: "CC BY-SA 4.0",
            permissions: PERMISSIVE,
            conditions: &[IncludeCopyright, SameLicense, StateChanges],
        },
        "CC-BY-NC-4.0" => &LicenseProperties {
            name: "CC BY-NC 4.0",
            permissions: NON_COMMERCIAL,
            conditions: &[IncludeCopyright, StateChanges],
        },
        "CC-BY-NC-SA-4.0" => &LicenseProperties {
            name: "CC BY-NC-SA 4.0",
            permissions: NON_COMMERCIAL,
            conditions: &[IncludeCopyright, SameLicense, StateChanges],
        },
        "GPL-3.0-only" => &LicenseProperties {
            name: "GNU General Public License v3.0 only",
            permissions: &[CommercialUse, Modifications, PrivateUse, PatentUse],
            conditions: &[IncludeCopyright, DiscloseSource, SameLicense, StateChanges],
        },
        "MIT" => &LicenseProperties {
            name: "MIT License",
            permissions: PERMISSIVE,
            conditions: &[IncludeCopyright],
        },
        "Unlicense" => &LicenseProperties {
            name: "The Unlicense",
            permissions: PERMISSIVE,
            conditions: &[],
        },
        "WTFPL" => &LicenseProperties {
            name: "Do What The F*ck You Want To Public License",
            permissions: PERMISSIVE,
            conditions: &[],
        },
        _ => return None,
    };
    Some(properties)
}

/// Split an SPDX expression into its alternatives. Blank means none.
pub fn parse_license(expression: &str) -> Vec<&str> {
    let expression = expression.trim();
    if expression.is_empty() {
        return Vec::new();
    }
    OR_SEPARATOR.split(expression).collect()
}

/// `license:*` tags for an optional SPDX expression.
pub fn license_tags(license: Option<&str>) -> BTreeSet<&'static str> {
    let ids = parse_license(license.unwrap_or_default());
    if ids.is_empty() {
        return BTreeSet::from(["license:no-license"]);
    }

    let mut tags = BTreeSet::new();
    let mut known = Vec::new();
    for id in ids {
        match known_license(id) {
            Some(properties) => known.push(properties),
            None => {
                tags.insert("license:unknown");
            }
        }
    }
    if known.is_empty() {
        return tags;
    }

    let permitted = |p: Permission| known.iter().any(|l| l.permissions.contains(&p));
    let required = |c: Requirement| known.iter().all(|l| l.conditions.contains(&c));
    if permitted(CommercialUse) {
        tags.insert("license:commercial");
    }
    if permitted(Modifications) {
        tags.insert("license:modifications");
    }
    if required(IncludeCopyright) {
        tags.insert("license:by");
    }
    if required(SameLicense) {
        tags.insert("license:sa");
    }
    tags
}
