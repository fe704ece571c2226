//! Client-side list-view core.
//!
//! This module holds the only reusable logic in the plugin: the
//! fetch → filter → paginate life cycle of a view over a fetched collection,
//! and the same lifecycle for single fetched values. Nothing here knows about
//! HTTP, Zellij or rendering; fetch outcomes are fed in through tickets.
//!
//! # Modules
//!
//! - `state`: lifecycle phases, [`LoadTicket`], [`FetchFailure`], [`ViewState`]
//! - `filter`: case-insensitive substring matching over extractor fields
//! - `page`: page arithmetic and [`VisibleSlice`]
//! - `controller`: [`CollectionController`]
//! - `resource`: [`Resource`]

pub mod controller;
pub mod filter;
pub mod page;
pub mod resource;
pub mod state;

pub use controller::CollectionController;
pub use filter::{Extract, SearchFilter};
pub use page::VisibleSlice;
pub use resource::Resource;
pub use state::{FetchFailure, LoadTicket, ViewState};
