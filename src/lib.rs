//! # Broadsheet
//!
//! A terminal news reader for articles published through a hosted content API.
//!
//! ## Architecture
//!
//! ```text
//! Source (content API | built-in articles) → Normalizer → Renderer → CLI / TUI
//! ```
//!
//! - [`source`]: content API client, built-in fallback articles, image URLs
//! - [`normalizer`]: converts API documents into domain articles
//! - [`render`]: turns an article body into presentation nodes
//! - [`tui`]: terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Home feed
//! broadsheet feed
//!
//! # One category, built-in articles only
//! broadsheet --offline feed --category Media
//!
//! # Read an article
//! broadsheet read 4
//!
//! # Launch TUI
//! broadsheet tui
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires the content sources,
/// the image URL builder and the render options together, and owns the
/// fallback policy.
pub mod app;

/// Command-line interface using clap.
///
/// - `feed [--category <title>]` - List the home feed
/// - `categories` - List categories
/// - `read <id>` - Print a rendered article
/// - `render <path>` - Render an article document from disk
/// - `tui` - Launch the TUI
pub mod cli;

/// Configuration loaded from `~/.config/broadsheet/config.toml`:
/// content API settings, reader glyphs, colors and keybindings.
pub mod config;

/// Core domain models.
///
/// - [`Article`](domain::Article): a loaded article with its body
/// - [`ContentBlock`](domain::ContentBlock): one node of the structured body
/// - [`FeedFilter`](domain::FeedFilter): category filter for the home feed
pub mod domain;

/// Conversion of content API documents into domain types.
pub mod normalizer;

/// Rich content rendering into [`PresentationNode`](render::PresentationNode)s.
pub mod render;

/// Content sources and asset resolution.
pub mod source;

/// Terminal user interface.
///
/// Category bar, article list, reader pane and status bar.
///
/// Keybindings: j/k navigate, Tab cycles panes, Enter opens, c cycles
/// categories, b bookmarks, l/o select and open links, R refreshes, q quits.
pub mod tui;
