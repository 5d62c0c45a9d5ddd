//! Round-trip fuzz test: decode(encode(x)) == x for arbitrary 64-bit values,
//! in both the signed-3 and unsigned-2 encodings.

#![no_main]
use libfuzzer_sys::fuzz_target;
use runbit::codec::Codec;
use runbit::mem::BitMemory;
use runbit::port::{InputPort, OutputPort, Signed, Unsigned};

fuzz_target!(|data: &[u8]| {
    let mem = BitMemory::new(64);
    for chunk in data.chunks_exact(8) {
        let raw = u64::from_le_bytes(chunk.try_into().unwrap());

        let mut out = OutputPort::<Signed<3>>::new(&mem);
        let mut input = InputPort::<Signed<3>>::new(&mem);
        Signed::<3>::encode(&mut out, 0, raw as i64);
        assert_eq!(Signed::<3>::decode(&mut input, 0), raw as i64);
        assert_eq!(input.position(), out.position());

        let mut out = OutputPort::<Unsigned<2>>::new(&mem);
        let mut input = InputPort::<Unsigned<2>>::new(&mem);
        Unsigned::<2>::encode(&mut out, 0, raw);
        assert_eq!(Unsigned::<2>::decode(&mut input, 0), raw);
        assert_eq!(input.position(), out.position());
    }
});
