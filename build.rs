//! Compiles `proto/discount.proto` into the discount service client (and the
//! server stub the tests stand up in-process).

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let proto_file = "proto/discount.proto";

    println!("cargo:rerun-if-changed={}", proto_file);

    tonic_build::configure()
        .build_client(true)
        .build_server(true)
        .compile_protos(&[proto_file], &["proto"])?;

    Ok(())
}
