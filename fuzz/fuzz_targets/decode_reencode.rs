//! Shortest-form fuzz test: decoding arbitrary bit soup and re-encoding the
//! value must never produce a longer sequence than the soup prefix that was
//! consumed.

#![no_main]
use libfuzzer_sys::fuzz_target;
use runbit::codec::Codec;
use runbit::mem::BitMemory;
use runbit::port::{InputPort, OutputPort, Signed};

fuzz_target!(|data: &[u8]| {
    let mut soup = data[..data.len().min(64)].to_vec();
    // a zero tail guarantees the decoder finds a terminator in-buffer
    soup.extend_from_slice(&[0u8; 8]);
    let mem = BitMemory::from_bytes(&soup);

    let mut input = InputPort::<Signed<3>>::new(&mem);
    let value = Signed::<3>::decode(&mut input, 0);
    let consumed = input.position();

    let reencoded = BitMemory::new(soup.len());
    let mut out = OutputPort::<Signed<3>>::new(&reencoded);
    Signed::<3>::encode(&mut out, 0, value);
    assert!(
        out.position() <= consumed,
        "{} re-encoded to {} bits from a {} bit sequence",
        value,
        out.position(),
        consumed
    );

    let mut check = InputPort::<Signed<3>>::new(&reencoded);
    assert_eq!(Signed::<3>::decode(&mut check, 0), value);
});
