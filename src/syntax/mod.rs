//! Syntax layer: XML project documents with source spans.
//!
//! The XML layer carries no schema knowledge; element kinds are recorded in
//! side tables keyed by [`ElementId`] during resolution.

pub mod xml;

pub use xml::{ElementId, OffsetMap, XAttribute, XDocument, XElement, XName, XmlError};
