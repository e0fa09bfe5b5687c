//! Section decoders
//!
//! One decoder per section kind the directory walker dispatches to. Each
//! seeks to its entry's offset on its own; the walker restores the cursor.

pub mod calibration;
pub mod image_data;
pub mod property_list;
pub mod utf16;

pub use calibration::{decode_calibration, CalibrationHeader};
pub use image_data::{decode_image_data, ImageDataDescriptor, ImageKind, PixelEncoding};
pub use property_list::{decode_property_list, PropertyCollection};
pub use utf16::{decode_utf16z, try_decode_utf16z, Utf16Error};
