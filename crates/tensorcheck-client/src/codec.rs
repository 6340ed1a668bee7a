use tensorcheck_core::{Shape, Tensor};
use tensorcheck_proto::tensor::v1 as pb;

pub fn check_tensor_request(tensor: Tensor) -> pb::CheckTensorRequest {
    pb::CheckTensorRequest {
        tensor: Some(tensor_to_pb(tensor)),
    }
}

pub fn tensor_to_pb(tensor: Tensor) -> pb::Tensor {
    pb::Tensor {
        shape: tensor.shape.0.into_vec(),
        values: tensor.values,
    }
}

pub fn pb_to_tensor(tensor: pb::Tensor) -> Tensor {
    Tensor {
        shape: Shape::from(tensor.shape),
        values: tensor.values,
    }
}
