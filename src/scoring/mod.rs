// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers.
//!
//! A text earns points per literal occurrence of each query token, more for
//! longer tokens and more again when the occurrence starts a word. Matching
//! several distinct tokens multiplies the total, so breadth beats repetition.

mod core;
pub mod ranking;

pub use core::*;
