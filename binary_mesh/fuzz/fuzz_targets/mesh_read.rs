#![no_main]
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Malformed data should return an error instead of panicking.
    let _ = binary_mesh::Mesh::<f32>::read(&mut Cursor::new(data));
});
