//! # Marquee Core
//!
//! State core for a Netflix-style browse page: paginated rows, hover
//! previews placed inside the viewport, and the TMDB-backed catalog that
//! feeds them. Rendering is left to the host; everything here is plain
//! data, commands and subscriptions.
//!
//! ## Architecture
//!
//! - [`carousel`]: paging state machine for a row plus an observable handle
//! - [`position`]: viewport-aware placement of preview pop-ups
//! - [`timer`] / [`hover`]: cancellable delays and hover intent
//! - [`row`]: a mounted row tying the carousel, breakpoints and settle timer
//! - [`providers`]: the [`providers::CategorySource`] seam and its TMDB client
//! - [`catalog`]: never-failing category loads and the detail cache
//! - [`featured`] / [`nav`]: banner selection and nav bar scroll state
//!
//! ## Examples
//!
//! ```
//! use marquee_core::carousel::CarouselEngine;
//!
//! let items = vec!['A', 'B', 'C', 'D', 'E', 'F', 'G'];
//! let mut row = CarouselEngine::new(items, 3);
//! assert_eq!(row.visible_slice(), &['A', 'B', 'C']);
//!
//! row.move_next();
//! row.settle_transition();
//! assert_eq!(row.visible_slice(), &['D', 'E', 'F']);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Row paging state machine and its observable handle
pub mod carousel;

/// Catalog loading and the detail memoization cache
pub mod catalog;

/// Error types and error handling utilities
pub mod error;

/// Featured banner selection and text helpers
pub mod featured;

/// Hover intent for preview pop-ups
pub mod hover;

/// Navigation bar scroll state
pub mod nav;

/// Viewport-aware pop-up placement
pub mod position;

/// External metadata providers (TMDB integration)
pub mod providers;

/// A mounted row
pub mod row;

/// Tracing subscriber setup for host shells
pub mod telemetry;

/// Cancellable one-shot timers
pub mod timer;

pub use error::{CoreError, Result};
pub use marquee_config as config;
pub use marquee_model as model;
