// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dragdrop Event State: small state machines behind a drag and drop runtime.
//!
//! Each module owns one piece of state and answers one question about it:
//!
//! - [`session`]: the single in-progress drag, its positions and whether the
//!   threshold has been crossed.
//! - [`axis`]: how a movement is constrained and whether it looks like a scroll.
//! - [`hover`]: which enter, over, leave and drop signals the latest hovered
//!   element produces.
//! - [`click`]: whether a click right after a drag should be swallowed.
//! - [`frame`]: last-wins batching of visual updates per animation frame.
//!
//! None of these know about elements beyond an opaque handle, and none of them
//! perform I/O. The `dragdrop` crate wires them to a host document.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod axis;
pub mod click;
pub mod frame;
pub mod hover;
pub mod session;
