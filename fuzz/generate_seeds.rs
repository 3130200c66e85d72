#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs
//!
//! The fuzz targets decode at 4x3, so well-formed seeds use that size.

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // P2 4x3
    let p2 = b"P2\n4 3\n255\n0 64 128 255 \n1 2 3 4 \n250 251 252 253 \n";
    fs::write(format!("{dir}/p2_4x3.pgm"), p2).unwrap();

    // P2 4x3 with comment lines and out-of-range samples
    let p2c = b"P2\n# seed\n# second\n4 3\n15\n-1 256 300 7\n1 2 3 4\n5 6 7 8\n";
    fs::write(format!("{dir}/p2_comment_4x3.pgm"), p2c).unwrap();

    // P5 4x3
    let p5 = b"P5\n4 3\n255\n\x00\x40\x80\xff\x01\x02\x03\x04\xfa\xfb\xfc\xfd";
    fs::write(format!("{dir}/p5_4x3.pgm"), p5).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_p2.bin"), b"P2").unwrap();
    fs::write(format!("{dir}/p3.bin"), b"P3\n4 3\n255\n").unwrap();
    fs::write(format!("{dir}/p2_short.bin"), b"P2\n4 3\n255\n1 2 3").unwrap();
    fs::write(format!("{dir}/p5_16bit.bin"), b"P5\n4 3\n65535\n\x00\x00").unwrap();
    fs::write(format!("{dir}/p2_wrong_size.bin"), b"P2\n512 512\n255\n0").unwrap();

    println!("Generated seed corpus in {dir}/");
}
