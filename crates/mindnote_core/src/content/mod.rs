//! Node content presentation.
//!
//! # Responsibility
//! - Translate node `style`/`textStyle` values into drawing directives.
//! - Classify media references and build embedded media URIs.
//!
//! Editing rules for comments, links and media live on the graph store
//! (`graph::content`) because they mutate node data.

pub mod media;
pub mod style;
