//! Table-driven OR for the unsigned run-length-2 encoding.
//!
//! Computes the same function as [`or`](super::or) instantiated at
//! [`Unsigned<2>`](crate::port::Unsigned), but with the run-length
//! bookkeeping unrolled into explicit operand states instead of a shift
//! register, and the escape/terminator decisions made per state transition.
//! Each operand is a small queue fed raw bits until a data bit is available;
//! popped data bits are ORed and re-escaped on the way out. The explicit
//! state space makes the machine amenable to exhaustive checking and direct
//! hardware mapping.
//!
//! Unlike the generic operator frame, this machine knows when both operands
//! have terminated *before* emitting trailing zeros, so its output is always
//! the canonical (shortest) form.

use crate::mem::BitMemory;

/// Load/data state of one operand stream.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Operand {
    /// Nothing buffered; a raw bit must be fetched.
    Empty,
    /// One unescaped zero buffered; may begin an escape run or the terminator.
    Z,
    /// Two unescaped zeros buffered; the next raw bit is decisive.
    Zz,
    /// A one ready to pop.
    D1,
    /// A zero then a one ready to pop (the run resolved on a one).
    D01,
    /// Two zeros ready to pop, confirmed as data by an escape bit.
    D00,
    /// One zero ready to pop (second half of a confirmed double zero).
    D0,
    /// Terminator consumed; pops zeros forever.
    Zero,
}

impl Operand {
    /// Data bit ready to pop, or `None` while more raw input is needed.
    fn pending(self) -> Option<bool> {
        match self {
            Operand::Empty | Operand::Z | Operand::Zz => None,
            Operand::D1 => Some(true),
            Operand::D01 | Operand::D00 | Operand::D0 | Operand::Zero => Some(false),
        }
    }

    /// Feeds one raw bit to a load state.
    fn load(self, raw: bool) -> Operand {
        match (self, raw) {
            (Operand::Empty, true) => Operand::D1,
            (Operand::Empty, false) => Operand::Z,
            (Operand::Z, true) => Operand::D01,
            (Operand::Z, false) => Operand::Zz,
            // a one after two zeros is the escape: both zeros were data
            (Operand::Zz, true) => Operand::D00,
            // a third zero is the terminator
            (Operand::Zz, false) => Operand::Zero,
            _ => unreachable!("load on a data state"),
        }
    }

    /// Consumes the pending data bit.
    fn pop(self) -> Operand {
        match self {
            Operand::D1 | Operand::D0 => Operand::Empty,
            Operand::D01 => Operand::D1,
            Operand::D00 => Operand::D0,
            Operand::Zero => Operand::Zero,
            _ => unreachable!("pop on a load state"),
        }
    }
}

/// ORs the unsigned run-length-2 sequences at `lhs` and `rhs` into `dst`,
/// returning the bit position one past the emitted terminator.
pub fn or2(mem: &BitMemory, dst: usize, lhs: usize, rhs: usize) -> usize {
    let mut l = Operand::Empty;
    let mut r = Operand::Empty;
    let mut lhs = lhs;
    let mut rhs = rhs;
    let mut out = dst;
    // zeros emitted since the last one or escape
    let mut zero_run = 0;

    loop {
        // loading takes precedence over data handling, left before right
        let lb = match l.pending() {
            Some(b) => b,
            None => {
                l = l.load(mem.get(lhs));
                lhs += 1;
                continue;
            }
        };
        let rb = match r.pending() {
            Some(b) => b,
            None => {
                r = r.load(mem.get(rhs));
                rhs += 1;
                continue;
            }
        };

        if zero_run == 2 {
            if l == Operand::Zero && r == Operand::Zero {
                // a third zero completes the terminator
                mem.set(out, false);
                return out + 1;
            }
            // escape so the double zero cannot read as the terminator
            mem.set(out, true);
            out += 1;
            zero_run = 0;
        }

        let b = lb | rb;
        mem.set(out, b);
        out += 1;
        zero_run = if b { 0 } else { zero_run + 1 };
        l = l.pop();
        r = r.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alu;
    use crate::codec::Codec;
    use crate::port::{InputPort, OutputPort, Unsigned};

    type U2 = Unsigned<2>;

    fn encode_pair(mem: &BitMemory, a: u64, b: u64) -> (usize, usize) {
        let mut out = OutputPort::<U2>::new(mem);
        U2::encode(&mut out, 0, a);
        let rhs = out.position();
        U2::encode(&mut out, rhs, b);
        (rhs, out.position())
    }

    #[test]
    fn matches_the_generic_operator() {
        let mem = BitMemory::new(64);
        for a in 0..512u64 {
            for b in 0..512u64 {
                let (rhs, end) = encode_pair(&mem, a, b);

                let table_end = or2(&mem, end, 0, rhs);
                let mut input = InputPort::<U2>::new(&mem);
                let table_value = U2::decode(&mut input, end);
                assert_eq!(table_value, a | b, "{:#x} | {:#x}", a, b);
                assert_eq!(input.position(), table_end, "terminator position");

                let mut out = OutputPort::<U2>::new(&mem);
                let mut l = InputPort::<U2>::new(&mem);
                let mut r = InputPort::<U2>::new(&mem);
                alu::or(&mut out, end, &mut l, 0, &mut r, rhs);
                assert_eq!(U2::decode(&mut input, end), a | b);
            }
        }
    }

    // The generic frame streams marker padding through as data and may
    // re-escape it; the table form must always match the canonical length.
    #[test]
    fn output_is_canonical_length() {
        let mem = BitMemory::new(64);
        let mut out = OutputPort::<U2>::new(&mem);
        for a in 0..512u64 {
            for b in 0..512u64 {
                let (rhs, end) = encode_pair(&mem, a, b);
                let or_end = or2(&mem, end, 0, rhs);
                U2::encode(&mut out, or_end, a | b);
                assert_eq!(
                    or_end - end,
                    out.position() - or_end,
                    "{:#x} | {:#x}",
                    a,
                    b
                );
            }
        }
    }
}
