fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = std::env::var("OUT_DIR")?;
    let descriptor_path = std::path::Path::new(&out_dir).join("tensorcheck_descriptor.bin");

    // The client goes through the generic unary invoker; only the server side
    // is generated, for in-process stub servers.
    tonic_prost_build::configure()
        .build_client(false)
        .build_server(true)
        .file_descriptor_set_path(descriptor_path)
        .compile_protos(&["src/tensor.proto"], &["src"])?;
    Ok(())
}
