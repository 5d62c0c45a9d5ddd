//! Streaming operators over encoded sequences.
//!
//! Every operator runs two input ports and one output port in lockstep,
//! reading a data bit from each operand and emitting a result bit per
//! iteration until both inputs have consumed their end-of-sequence markers.
//! A stopped input keeps reporting its marker polarity, so a short operand
//! behaves as if padded with an infinite constant tail. After the loop the
//! two retained polarities determine the result's own marker polarity, and
//! the output is finalised without ever rewinding: redundant zero data bits
//! stay in the stream (re-encoding the decoded result drops them).
//!
//! Operands and result may live in the same [`BitMemory`] as long as the
//! emitted range does not overlap a still-unread range; laying the result
//! out after both operands, as the tests here do, is the simple way to
//! guarantee that.
//!
//! The shift operators are the one departure from pure streaming: the count
//! operand is decoded to a machine integer before any output is emitted, and
//! counts outside `0..=`[`MAX_SHIFT`] are rejected.

pub mod or_table;

use crate::codec::Codec;
use crate::port::{Encoding, InputPort, OutputPort};
use log::debug;

/// Largest accepted shift count. A left shift by `MAX_SHIFT` emits that many
/// zero bits, so callers must size the output region accordingly.
pub const MAX_SHIFT: u32 = 1 << 16;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ShiftError {
    /// The count operand decoded outside `0..=MAX_SHIFT`.
    CountOutOfRange(i128),
}

fn bitwise<E: Encoding>(
    out: &mut OutputPort<'_, E>,
    out_pos: usize,
    l: &mut InputPort<'_, E>,
    l_pos: usize,
    r: &mut InputPort<'_, E>,
    r_pos: usize,
    f: impl Fn(bool, bool) -> bool,
) {
    out.start(out_pos);
    l.start(l_pos);
    r.start(r_pos);
    loop {
        l.next_bit();
        r.next_bit();
        out.emit_bit(f(l.bit(), r.bit()));
        if !l.is_active() && !r.is_active() {
            break;
        }
    }
    // both inputs now hold their marker polarities
    out.finish_eos(f(l.bit(), r.bit()));
}

/// Bitwise AND of the sequences at `l_pos` and `r_pos`.
pub fn and<E: Encoding>(
    out: &mut OutputPort<'_, E>,
    out_pos: usize,
    l: &mut InputPort<'_, E>,
    l_pos: usize,
    r: &mut InputPort<'_, E>,
    r_pos: usize,
) {
    bitwise(out, out_pos, l, l_pos, r, r_pos, |a, b| a & b);
}

/// Bitwise OR of the sequences at `l_pos` and `r_pos`.
pub fn or<E: Encoding>(
    out: &mut OutputPort<'_, E>,
    out_pos: usize,
    l: &mut InputPort<'_, E>,
    l_pos: usize,
    r: &mut InputPort<'_, E>,
    r_pos: usize,
) {
    bitwise(out, out_pos, l, l_pos, r, r_pos, |a, b| a | b);
}

/// Bitwise XOR of the sequences at `l_pos` and `r_pos`.
pub fn xor<E: Encoding>(
    out: &mut OutputPort<'_, E>,
    out_pos: usize,
    l: &mut InputPort<'_, E>,
    l_pos: usize,
    r: &mut InputPort<'_, E>,
    r_pos: usize,
) {
    bitwise(out, out_pos, l, l_pos, r, r_pos, |a, b| a ^ b);
}

/// Streaming addition: a full adder per bit with the carry threaded through.
///
/// The final carry may still need a data bit after both inputs stop; it is
/// folded into the marker prefix, which is why a sum can be one data bit
/// longer than the longer operand.
pub fn add<E: Encoding>(
    out: &mut OutputPort<'_, E>,
    out_pos: usize,
    l: &mut InputPort<'_, E>,
    l_pos: usize,
    r: &mut InputPort<'_, E>,
    r_pos: usize,
) {
    out.start(out_pos);
    l.start(l_pos);
    r.start(r_pos);
    let mut carry = false;
    loop {
        l.next_bit();
        r.next_bit();
        let sum = l.bit() ^ r.bit() ^ carry;
        carry = if carry {
            l.bit() | r.bit()
        } else {
            l.bit() & r.bit()
        };
        out.emit_bit(sum);
        if !l.is_active() && !r.is_active() {
            break;
        }
    }
    out.finish_eos(carry ^ l.bit() ^ r.bit());
}

/// Streaming subtraction: [`add`] with the right operand inverted and the
/// carry seeded to one.
pub fn sub<E: Encoding>(
    out: &mut OutputPort<'_, E>,
    out_pos: usize,
    l: &mut InputPort<'_, E>,
    l_pos: usize,
    r: &mut InputPort<'_, E>,
    r_pos: usize,
) {
    out.start(out_pos);
    l.start(l_pos);
    r.start(r_pos);
    let mut carry = true;
    loop {
        l.next_bit();
        r.next_bit();
        let rb = !r.bit();
        let diff = l.bit() ^ rb ^ carry;
        carry = if carry { l.bit() | rb } else { l.bit() & rb };
        out.emit_bit(diff);
        if !l.is_active() && !r.is_active() {
            break;
        }
    }
    out.finish_eos(!carry ^ l.bit() ^ r.bit());
}

fn shift_count<E: Codec>(r: &mut InputPort<'_, E>, r_pos: usize) -> Result<u32, ShiftError> {
    let count: i128 = E::decode(r, r_pos).into();
    if !(0..=MAX_SHIFT as i128).contains(&count) {
        debug!("rejecting shift count {} (limit {})", count, MAX_SHIFT);
        return Err(ShiftError::CountOutOfRange(count));
    }
    Ok(count as u32)
}

/// Logical shift left: the sequence at `l_pos` shifted up by the count
/// decoded from `r_pos`.
pub fn lsl<E: Codec>(
    out: &mut OutputPort<'_, E>,
    out_pos: usize,
    l: &mut InputPort<'_, E>,
    l_pos: usize,
    r: &mut InputPort<'_, E>,
    r_pos: usize,
) -> Result<(), ShiftError> {
    let count = shift_count(r, r_pos)?;
    out.start(out_pos);
    l.start(l_pos);
    for _ in 0..count {
        out.emit_bit(false);
    }
    loop {
        l.next_bit();
        out.emit_bit(l.bit());
        if !l.is_active() {
            break;
        }
    }
    out.finish_eos(l.bit());
    Ok(())
}

/// Shift right: the sequence at `l_pos` with the first `count` data bits
/// discarded. The vacated upper bits take the operand's marker polarity, so
/// for the signed encodings this is an arithmetic shift.
pub fn lsr<E: Codec>(
    out: &mut OutputPort<'_, E>,
    out_pos: usize,
    l: &mut InputPort<'_, E>,
    l_pos: usize,
    r: &mut InputPort<'_, E>,
    r_pos: usize,
) -> Result<(), ShiftError> {
    let mut count = shift_count(r, r_pos)?;
    out.start(out_pos);
    l.start(l_pos);
    loop {
        l.next_bit();
        if count > 0 {
            count -= 1;
        } else {
            out.emit_bit(l.bit());
        }
        if !l.is_active() {
            break;
        }
    }
    out.finish_eos(l.bit());
    Ok(())
}
