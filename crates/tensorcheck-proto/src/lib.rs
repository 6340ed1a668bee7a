pub mod tensor {
    pub mod v1 {
        tonic::include_proto!("tensor.v1");
    }
}

/// Encoded `FileDescriptorSet` for `tensor.proto`.
pub const FILE_DESCRIPTOR_SET: &[u8] =
    tonic::include_file_descriptor_set!("tensorcheck_descriptor");
