// Copyright 2025 the Dragdrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Real-target resolution: which element is under the pointer, really.
//!
//! 1) Start from the element the device reported, or hit test the rounded
//!    client position (falling back to the body).
//! 2) If that element is the avatar or inside it, hide the avatar, hit test
//!    again and show it again.
//! 3) Descend through shadow roots: while the element hosts a shadow tree with
//!    something at the position, continue with that element.
//!
//! Step 3 stops when the shadow query returns nothing, returns the element
//! itself, returns an element already visited, or after
//! [`MAX_SHADOW_DEPTH`] hops. A host with cyclic shadow trees therefore
//! cannot hang resolution.

use kurbo::Point;
use smallvec::SmallVec;
use tracing::trace;

use crate::host::Host;

/// Upper bound on shadow boundaries crossed by one resolution.
pub const MAX_SHADOW_DEPTH: usize = 32;

fn from_point<H: Host>(host: &H, client: Point) -> H::Element {
    host.element_from_point(client.round())
        .unwrap_or_else(|| host.body())
}

/// Resolve the element a drag notification should be dispatched at.
pub fn real_target<H: Host>(
    host: &mut H,
    client: Point,
    reported: Option<H::Element>,
    avatar: Option<H::Element>,
) -> H::Element {
    let mut target = reported.unwrap_or_else(|| from_point(host, client));
    if let Some(avatar) = avatar
        && host.contains(avatar, target)
    {
        host.set_visibility(avatar, false);
        target = from_point(host, client);
        host.set_visibility(avatar, true);
    }
    shadow_retarget(host, client, target)
}

/// Follow shadow roots from `target` at `client`.
pub fn shadow_retarget<H: Host>(host: &H, client: Point, target: H::Element) -> H::Element {
    let client = client.round();
    let mut visited: SmallVec<[H::Element; 4]> = SmallVec::new();
    let mut current = target;
    while visited.len() < MAX_SHADOW_DEPTH {
        visited.push(current);
        match host.shadow_element_from_point(current, client) {
            Some(next) if !visited.contains(&next) => current = next,
            Some(next) => {
                trace!(target: "dragdrop::gesture", element = ?next, "shadow retarget revisited an element");
                break;
            }
            None => break,
        }
    }
    current
}
