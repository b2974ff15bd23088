pub mod finder;

pub use finder::{AssetEnumerator, FsAssetEnumerator};
