//! Directive schema for systemd unit file sections

mod registry;

pub use registry::{
    SchemaError, SchemaRegistry, SectionClass, SectionSchema, VENDOR_EXTENSION_PREFIX,
};
