#![no_main]
use libfuzzer_sys::fuzz_target;
use zenstego::Dimensions;

fuzz_target!(|data: &[u8]| {
    // Small fixed size so short inputs can reach the pixel loops
    let dims = Dimensions::new(4, 3);

    // Auto-detect and each variant explicitly; must never panic
    let _ = zenstego::pgm::decode(data, dims, enough::Unstoppable);
    let _ = zenstego::pgm::decode_text(data, dims, enough::Unstoppable);
    let _ = zenstego::pgm::decode_binary(data, dims, enough::Unstoppable);
});
