// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits describing what the system
// works with: date pairs, character vocabularies and the
// source that produces them.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A (human date, machine date) example
pub mod date_pair;

// Character ↔ index mappings
pub mod vocab;

// Pairs plus the vocabularies built from them
pub mod corpus;

// Core abstractions (traits) that other layers implement
pub mod traits;
