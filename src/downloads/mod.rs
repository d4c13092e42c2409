/**
 * Downloads Module
 *
 * Manifest-driven download of TensorFlow.js models: fetch `model.json`,
 * read its shard list, then fetch every shard into the same folder.
 */

mod downloader;
mod manifest;
mod model_fetcher;

pub use downloader::*;
pub use manifest::*;
pub use model_fetcher::*;
