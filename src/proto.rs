//! Generated code for the `discount.Discount` gRPC service
//! (`proto/discount.proto`).

tonic::include_proto!("discount");
