//! # docgraph
//!
//! Document relationship graphs and frontmatter tooling for markdown
//! documentation sets, plus the `docgraph` command line tool.
//!
//! Re-exports [`docgraph_core`], [`docgraph_parser`] and [`docgraph_graph`].
//!
//! ```no_run
//! use docgraph::{DocSet, GraphFilter, load_settings, to_force_graph};
//! use std::path::Path;
//!
//! let config = load_settings(None)?;
//! let docs = DocSet::load(Path::new("docs"), config)?;
//! let graph = docs.graph(&GraphFilter::new().with_tag("react"));
//! println!("{}", serde_json::to_string(&to_force_graph(&graph)).unwrap());
//! # Ok::<(), docgraph::Error>(())
//! ```

pub mod report;
pub mod settings;

pub use docgraph_core::*;
pub use docgraph_graph::*;
pub use docgraph_parser::*;
pub use report::{DocSet, DocumentValidation, StatsReport};
pub use settings::{ENV_PREFIX, load_settings};

pub mod prelude {
    pub use crate::report::DocSet;
    pub use crate::settings::load_settings;
    pub use docgraph_graph::prelude::*;
}
