//! Formatter registration: binding type-name patterns to shapes.
//!
//! The host inspector asks by type name ("what is the summary for a
//! `vec`?", "give me a child provider for this `screen`"); this table
//! answers by matching the name against anchored regex patterns bound at
//! startup. The default table carries the bindings for the terminal
//! multiplexer target this engine grew up against; hosts with other
//! targets build their own.
//!
//! Tables are configuration: built once, immutable afterwards.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::core::value::ValueHandle;
use crate::inspect::Inspect;
use crate::shapes::GridNames;
use crate::summary;
use crate::synthetic::{
    BufferChildren, GridChildren, IntSliceChildren, SyntheticChildren, VecChildren,
};

/// Errors raised while binding patterns.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid type-name pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// The container shapes a pattern can be bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerShape {
    /// Growable typed array (`length`/`capacity`/`content`/`typename`)
    Vec,
    /// Heap text buffer (`len`/`cap`/`content`)
    StringBuffer,
    /// Borrowed byte run (`len`/`content`), summarized with its text
    ByteSlice,
    /// Fixed-capacity integer slice (`n`/`content`)
    IntSlice,
    /// Row/grid container; field names vary per binding
    Grid(GridNames),
    /// Row of cells (`eol`/`cells`)
    Line,
    Color,
    Codepoint,
    Cell,
    CellStyle,
}

struct Binding {
    pattern: Regex,
    shape: ContainerShape,
}

/// An immutable-after-setup table mapping type names to formatters.
#[derive(Default)]
pub struct FormatterTable {
    bindings: Vec<Binding>,
}

impl FormatterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `pattern` (a regex matched against the full type name) to a
    /// shape. First matching binding wins at lookup time.
    pub fn bind(&mut self, pattern: &str, shape: ContainerShape) -> Result<(), RegistryError> {
        let anchored = format!("^(?:{})$", pattern);
        let pattern = Regex::new(&anchored).map_err(|source| RegistryError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.bindings.push(Binding { pattern, shape });
        Ok(())
    }

    pub fn shape_for(&self, type_name: &str) -> Option<&ContainerShape> {
        self.bindings
            .iter()
            .find(|b| b.pattern.is_match(type_name))
            .map(|b| &b.shape)
    }

    /// One-line summary for a value of the named type, or `None` when no
    /// binding matches.
    pub fn summarize(
        &self,
        type_name: &str,
        handle: &ValueHandle,
        ctx: &Inspect<'_>,
    ) -> Option<String> {
        let shape = self.shape_for(type_name)?;
        Some(match shape {
            ContainerShape::Vec => summary::vec_summary(handle, ctx),
            ContainerShape::StringBuffer => summary::string_summary(handle, ctx),
            ContainerShape::ByteSlice => summary::byte_slice_summary(handle, ctx),
            ContainerShape::IntSlice => summary::int_slice_summary(handle, ctx),
            ContainerShape::Grid(names) => summary::grid_summary(handle, ctx, names),
            ContainerShape::Line => summary::line_summary(handle, ctx),
            ContainerShape::Color => summary::color_summary(handle, ctx),
            ContainerShape::Codepoint => summary::codepoint_summary(handle, ctx),
            ContainerShape::Cell => summary::cell_summary(handle, ctx),
            ContainerShape::CellStyle => summary::cell_style_summary(handle, ctx),
        })
    }

    /// A fresh child provider for a value of the named type, or `None`
    /// for shapes that only summarize.
    pub fn provider_for(
        &self,
        type_name: &str,
        handle: &ValueHandle,
    ) -> Option<Box<dyn SyntheticChildren>> {
        match self.shape_for(type_name)? {
            ContainerShape::Vec => Some(Box::new(VecChildren::new(handle.clone()))),
            ContainerShape::StringBuffer | ContainerShape::ByteSlice => {
                Some(Box::new(BufferChildren::new(handle.clone())))
            }
            ContainerShape::IntSlice => Some(Box::new(IntSliceChildren::new(handle.clone()))),
            ContainerShape::Grid(names) => names
                .row_ptr
                .is_some()
                .then(|| -> Box<dyn SyntheticChildren> {
                    Box::new(GridChildren::new(handle.clone(), names.clone()))
                }),
            _ => None,
        }
    }
}

/// Bindings for the terminal-multiplexer target: its vector, string and
/// slice collections, its screen grid, and its cell value types.
fn standard_bindings(table: &mut FormatterTable) -> Result<(), RegistryError> {
    table.bind("vec", ContainerShape::Vec)?;
    table.bind("string", ContainerShape::StringBuffer)?;
    table.bind("u8_slice", ContainerShape::ByteSlice)?;
    table.bind("int_slice", ContainerShape::IntSlice)?;
    table.bind("screen", ContainerShape::Grid(GridNames::default()))?;
    table.bind(
        "velvet_scene",
        ContainerShape::Grid(GridNames::summary_only("lines", "columns")),
    )?;
    table.bind("screen_line", ContainerShape::Line)?;
    table.bind("color", ContainerShape::Color)?;
    table.bind("codepoint", ContainerShape::Codepoint)?;
    table.bind("screen_cell", ContainerShape::Cell)?;
    table.bind("screen_cell_style", ContainerShape::CellStyle)?;
    Ok(())
}

static DEFAULT_TABLE: Lazy<FormatterTable> = Lazy::new(|| {
    let mut table = FormatterTable::new();
    standard_bindings(&mut table).expect("standard bindings are valid patterns");
    table
});

/// The process-wide default table, initialized on first use.
pub fn default_table() -> &'static FormatterTable {
    &DEFAULT_TABLE
}
