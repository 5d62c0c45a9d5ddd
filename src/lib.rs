//! Variable-length integers stored as self-delimiting bitstrings in
//! bit-addressable memory, and streaming arithmetic over them.
//!
//! An integer is written least-significant-bit first and terminated by a
//! run-length marker, with escape bits keeping data runs distinguishable
//! from the marker (see the [`port`] module for the encoding rules). Because
//! the representation is self-delimiting at both ends, the operators in
//! [`alu`] read two operands and write the result bit by bit without knowing
//! any operand's width in advance; there is no overflow, results simply
//! grow by a bit when they must.
//!
//! ```
//! use runbit::alu;
//! use runbit::codec::Codec;
//! use runbit::mem::BitMemory;
//! use runbit::port::{InputPort, OutputPort, Signed};
//!
//! type S3 = Signed<3>;
//!
//! let mem = BitMemory::new(64);
//! let mut out = OutputPort::<S3>::new(&mem);
//! let mut l = InputPort::<S3>::new(&mem);
//! let mut r = InputPort::<S3>::new(&mem);
//!
//! // lay the operands out back to back, then the result after them
//! S3::encode(&mut out, 0, 100);
//! let r_pos = out.position();
//! S3::encode(&mut out, r_pos, -42);
//! let sum_pos = out.position();
//! alu::add(&mut out, sum_pos, &mut l, 0, &mut r, r_pos);
//!
//! let mut result = InputPort::<S3>::new(&mem);
//! assert_eq!(S3::decode(&mut result, sum_pos), 58);
//! ```

pub mod alu;
pub mod codec;
pub mod mem;
pub mod port;
