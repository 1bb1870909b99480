fn main() -> Result<(), Box<dyn std::error::Error>> {
    let proto_files = &["../proto/milvus.proto"];
    // milvus.proto imports common.proto and schema.proto from the same directory.
    let include_paths = &["../proto/"];

    tonic_build::configure()
        .build_client(true)
        .build_server(true) // Used by the transport integration tests
        .extern_path(".milvus.proto.common", "::milvus_core::grpc_api::common")
        .extern_path(".milvus.proto.schema", "::milvus_core::grpc_api::schema")
        .compile(proto_files, include_paths)?;

    Ok(())
}
