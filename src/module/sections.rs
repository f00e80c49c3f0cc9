//! Section identifiers and tracked section ranges.
//!
//! A WASM module is a flat sequence of sections after the 8-byte header, each
//! introduced by a one-byte id and a ULEB128 payload size. Disassembly only
//! needs the code section's payload, but the walk records the type and
//! function section ranges as well since trace tooling upstream keys on them.

use std::ops::Range;

use strum::{EnumCount, EnumIter};

/// Identifies a standard WASM section by its wire id.
///
/// The discriminant of each variant is the id byte as it appears in the
/// module. Ids outside this set (proposals, future extensions) are treated
/// like custom sections and skipped by their declared size.
#[derive(Clone, Copy, PartialEq, Debug, EnumIter, EnumCount, Eq, Hash)]
pub enum SectionId {
    /// `Custom` section (0) - Named, tool-specific payload; ignored here.
    Custom = 0,

    /// `Type` section (1) - Function signatures referenced by index.
    Type = 1,

    /// `Import` section (2) - Functions, tables, memories and globals
    /// provided by the host.
    Import = 2,

    /// `Function` section (3) - Maps each defined function to its type index.
    Function = 3,

    /// `Table` section (4) - Indirection tables for `call_indirect`.
    Table = 4,

    /// `Memory` section (5) - Linear memory limits.
    Memory = 5,

    /// `Global` section (6) - Module globals with initializer expressions.
    Global = 6,

    /// `Export` section (7) - Names the module exposes to the host.
    Export = 7,

    /// `Start` section (8) - Optional function run at instantiation.
    Start = 8,

    /// `Element` section (9) - Table initializer segments.
    Element = 9,

    /// `Code` section (10) - Function bodies; the payload disassembly reads.
    Code = 10,

    /// `Data` section (11) - Linear memory initializer segments.
    Data = 11,
}

impl SectionId {
    /// Convert a raw section id byte into a [`SectionId`].
    ///
    /// Returns `None` for ids outside the standard set, which the section
    /// walk then skips by size like any other uninteresting section.
    #[must_use]
    pub fn from_u8(value: u8) -> Option<SectionId> {
        match value {
            0 => Some(SectionId::Custom),
            1 => Some(SectionId::Type),
            2 => Some(SectionId::Import),
            3 => Some(SectionId::Function),
            4 => Some(SectionId::Table),
            5 => Some(SectionId::Memory),
            6 => Some(SectionId::Global),
            7 => Some(SectionId::Export),
            8 => Some(SectionId::Start),
            9 => Some(SectionId::Element),
            10 => Some(SectionId::Code),
            11 => Some(SectionId::Data),
            _ => None,
        }
    }
}

/// Payload byte ranges of the sections the disassembler tracks.
///
/// Ranges are absolute offsets into the module buffer, covering the section
/// payload only (id byte and size varint excluded). A `None` field means the
/// module simply does not carry that section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    /// Payload range of the type section, if present.
    pub types: Option<Range<usize>>,
    /// Payload range of the function section, if present.
    pub functions: Option<Range<usize>>,
    /// Payload range of the code section, if present.
    pub code: Option<Range<usize>>,
}
