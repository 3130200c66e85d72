use enough::Unstoppable;
use proptest::prelude::*;
use zenstego::*;

const DIMS: Dimensions = Dimensions::new(8, 5);

fn raster() -> impl Strategy<Value = Raster> {
    prop::collection::vec(any::<u8>(), DIMS.pixel_count())
        .prop_map(|pixels| Raster::from_pixels(DIMS, pixels).unwrap())
}

proptest! {
    #[test]
    fn prop_text_roundtrip_is_identity(r in raster()) {
        let encoded = pgm::encode_text(&r, Unstoppable).unwrap();
        prop_assert_eq!(pgm::decode_text(&encoded, DIMS, Unstoppable).unwrap(), r);
    }

    #[test]
    fn prop_embed_keeps_cover_high_nibble(cover in raster(), secret in raster()) {
        let stego = lsb::embed(&cover, &secret).unwrap();
        for (&s, &c) in stego.pixels().iter().zip(cover.pixels()) {
            prop_assert_eq!(s & 0xF0, c & 0xF0);
        }
    }

    #[test]
    fn prop_extract_shifts_low_nibble(stego in raster()) {
        let out = lsb::extract(&stego).unwrap();
        for (&o, &s) in out.pixels().iter().zip(stego.pixels()) {
            prop_assert_eq!(o, (s & 0x0F) << 4);
        }
    }

    #[test]
    fn prop_recovery_ignores_cover(a in raster(), b in raster(), secret in raster()) {
        let from_a = lsb::extract(&lsb::embed(&a, &secret).unwrap()).unwrap();
        let from_b = lsb::extract(&lsb::embed(&b, &secret).unwrap()).unwrap();
        prop_assert_eq!(&from_a, &from_b);
        for (&r, &s) in from_a.pixels().iter().zip(secret.pixels()) {
            prop_assert_eq!(r, s & 0xF0);
        }
    }

    #[test]
    fn prop_decoders_never_panic(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = pgm::decode_text(&data, DIMS, Unstoppable);
        let _ = pgm::decode_binary(&data, DIMS, Unstoppable);
        let _ = pgm::decode(&data, DIMS, Unstoppable);
    }
}
