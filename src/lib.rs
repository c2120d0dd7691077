//! Resona - Symbolic Wave Algebra
//!
//! Resona represents periodic signals symbolically, as sums of
//! sinusoid components (frequency, amplitude, phase), instead of as
//! raw sample buffers, and provides algebra over that representation:
//!
//! 1. Construction from classical waveform series or Fourier analysis
//!    of measured samples
//! 2. Arithmetic, calculus, canonicalization, and interference
//!    reduction on the symbolic form
//! 3. Synthesis back to time-domain samples and conditioning for
//!    audio playback
//!
//! # Architecture
//!
//! The wave algebra engine ([`wave`]) sits on a small numeric kernel
//! ([`numeric`]) and a Fourier bridge ([`fourier`]); persistence
//! ([`io`]) and the streaming audio interface ([`audio`]) sit above
//! it. Process-wide defaults for tolerance and sample rate live in
//! [`config`].

pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod fourier;
pub mod io;
pub mod numeric;
pub mod wave;

pub use config::Config;
pub use error::{ErrorKind, ResonaError, Result};
pub use wave::{Sinusoid, Wave};
