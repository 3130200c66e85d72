#![no_main]
use libfuzzer_sys::fuzz_target;
use zenstego::*;

fuzz_target!(|data: &[u8]| {
    let dims = Dimensions::new(4, 3);

    // If we can decode it, re-encoding in both variants must reproduce the pixels
    let Ok(decoded) = pgm::decode(data, dims, enough::Unstoppable) else {
        return;
    };

    for variant in [PgmVariant::Text, PgmVariant::Binary] {
        let Ok(reencoded) = pgm::encode(&decoded, variant, enough::Unstoppable) else {
            panic!("encode of a decoded raster failed");
        };
        let Ok(decoded2) = pgm::decode(&reencoded, dims, enough::Unstoppable) else {
            panic!("re-encoded data failed to decode");
        };
        assert_eq!(decoded, decoded2, "roundtrip pixel mismatch");
    }

    // Hiding the decoded image in itself must recover its high nibbles
    let stego = lsb::embed(&decoded, &decoded).unwrap();
    let recovered = lsb::extract(&stego).unwrap();
    for (&r, &s) in recovered.pixels().iter().zip(decoded.pixels()) {
        assert_eq!(r, s & 0xF0);
    }
});
