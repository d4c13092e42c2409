/**
 * Paths Module
 *
 * Resolution of local file paths and remote URLs for model artifacts.
 * All joins of folder/URL with a file name go through this module.
 */
mod targets;

pub use targets::*;
