// Rust code generated from ../proto by tonic_build (see build.rs).
//
// The proto files are a subset of the upstream Milvus definitions with the
// same field numbers and enum values, so the encoded bytes are interchangeable
// with other Milvus SDKs. The `milvus.proto.milvus` package, which holds the
// service and request messages, is compiled in milvus-client.

/// Package `milvus.proto.common`.
pub mod common {
    include!(concat!(env!("OUT_DIR"), "/milvus.proto.common.rs"));
}

/// Package `milvus.proto.schema`.
pub mod schema {
    include!(concat!(env!("OUT_DIR"), "/milvus.proto.schema.rs"));
}
