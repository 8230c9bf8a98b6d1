// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod location;
pub mod nps;
pub mod thing_to_do;

pub use location::GeoPoint;
pub use nps::{NpsPage, NpsThingToDoRecord};
pub use thing_to_do::ThingToDo;
