#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: binary_mesh::Mesh<f32>| {
    binary_mesh_fuzz::test_write_read_write(&data);
});
