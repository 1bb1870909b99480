fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Message-only packages; the service lives in milvus.proto and is
    // compiled by milvus-client against these types.
    let proto_files = &["../proto/common.proto", "../proto/schema.proto"];
    let include_paths = &["../proto/"];

    tonic_build::configure()
        .build_server(false)
        .build_client(false)
        .compile(proto_files, include_paths)?;

    Ok(())
}
