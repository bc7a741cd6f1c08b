// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Understory crates.
//!
//! Each adapter is gated behind a feature flag so the core engine stays free
//! of layout dependencies.
//!
//! ## Available Adapters
//!
//! - [`lazy_grid`] (`lazy_grid_adapter` feature): implements
//!   [`LayoutQuery`](crate::LayoutQuery) for [`understory_lazy_grid::LazyGrid`].

#[cfg(feature = "lazy_grid_adapter")]
pub mod lazy_grid;
