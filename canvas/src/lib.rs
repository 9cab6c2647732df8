//! Canvas engine for the reference-scaled measurement tool.
//!
//! This crate is compiled to WebAssembly and runs in the browser. A user loads
//! a photo that contains a reference object of known width (a payment card),
//! drags two calibration markers onto its edges and two measurement markers
//! onto the points of interest (the pupils), and gets back the distance between
//! them in millimeters. The host JavaScript layer only wires DOM events to the
//! engine and applies the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`markers`] | The four fixed markers, their pairs and the clamped store |
//! | [`coords`] | Client, surface and normalized coordinate conversions |
//! | [`input`] | Pointer extraction and the drag state machine |
//! | [`hit`] | Pixel-space hit-testing against markers |
//! | [`render`] | Pure scene drawing through the [`render::Surface`] trait |
//! | [`measure`] | Scale factor, measured distance and validation |
//! | [`ingest`] | Upload checks and display fitting |
//! | [`config`] | JSON-loadable tunables |
//! | [`consts`] | Shared numeric defaults (thresholds, seeds, glyph sizes) |

pub mod config;
pub mod consts;
pub mod coords;
pub mod engine;
pub mod hit;
pub mod ingest;
pub mod input;
pub mod markers;
pub mod measure;
pub mod render;
