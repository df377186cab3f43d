// MIT LICENSE
//
// Copyright (c) 2021 Dash Core Group
//
// Permission is hereby granted, free of charge, to any
// person obtaining a copy of this software and associated
// documentation files (the "Software"), to deal in the
// Software without restriction, including without
// limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software
// is furnished to do so, subject to the following
// conditions:
//
// The above copyright notice and this permission notice
// shall be included in all copies or substantial portions
// of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF
// ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED
// TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
// SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY
// CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR
// IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.

//! Indented text dumps of tree levels, nodes and proof elements.

use core::fmt;
use std::io::{Result, Write};

use itertools::Itertools;

/// Hex digits kept on each side of an abbreviated digest.
const HEX_EDGE: usize = 8;
const INDENT_SPACES: usize = 4;

/// Something that can draw itself with a [`Drawer`].
pub trait Visualize {
    /// Write a representation of `self` and hand the drawer back.
    fn visualize<W: Write>(&self, drawer: Drawer<W>) -> Result<Drawer<W>>;
}

/// `Debug` wrapper printing bytes as abbreviated hex.
#[derive(PartialOrd, Ord, PartialEq, Eq, Hash, Clone)]
pub struct DebugBytes(pub Vec<u8>);

impl fmt::Debug for DebugBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&visualize_to_string(self.0.as_slice()))
    }
}

/// An `io::Write` proxy that indents every line by the current depth.
pub struct Drawer<W: Write> {
    depth: usize,
    write: W,
}

impl<W: Write> Drawer<W> {
    /// Start drawing at depth zero.
    pub fn new(write: W) -> Self {
        Drawer { depth: 0, write }
    }

    /// Indent subsequent lines one step further.
    pub fn down(&mut self) {
        self.depth += 1;
    }

    /// Undo one [`down`](Self::down).
    pub fn up(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Write `buf`, indenting whatever follows each line break.
    pub fn write(&mut self, buf: &[u8]) -> Result<()> {
        let mut separator = b"\n".to_vec();
        separator.extend(std::iter::repeat_n(b' ', INDENT_SPACES * self.depth));
        for chunk in Itertools::intersperse(buf.split(|c| *c == b'\n'), separator.as_slice()) {
            self.write.write_all(chunk)?;
        }
        Ok(())
    }

    /// Start a new line at the current depth.
    pub fn newline(&mut self) -> Result<()> {
        self.write(b"\n")
    }

    /// Terminate the dump and flush the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.write.write_all(b"\n")?;
        self.write.flush()
    }
}

/// Hex encode `bytes`, eliding the middle of long values.
pub fn to_hex(bytes: &[u8]) -> String {
    let encoded = hex::encode(bytes);
    if encoded.len() > 2 * HEX_EDGE + 8 {
        format!(
            "{}..{}",
            &encoded[..HEX_EDGE],
            &encoded[encoded.len() - HEX_EDGE..]
        )
    } else {
        encoded
    }
}

impl Visualize for [u8] {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        drawer.write(format!("0x{}", to_hex(self)).as_bytes())?;
        Ok(drawer)
    }
}

impl Visualize for Vec<u8> {
    fn visualize<W: Write>(&self, drawer: Drawer<W>) -> Result<Drawer<W>> {
        self.as_slice().visualize(drawer)
    }
}

impl Visualize for [u8; 32] {
    fn visualize<W: Write>(&self, drawer: Drawer<W>) -> Result<Drawer<W>> {
        self.as_slice().visualize(drawer)
    }
}

macro_rules! visualize_display {
    ($($ty:ty),+) => {
        $(
            impl Visualize for $ty {
                fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
                    drawer.write(self.to_string().as_bytes())?;
                    Ok(drawer)
                }
            }
        )+
    };
}

visualize_display!(u8, u16, u32, u64, u128, usize, i64, String);

impl<T: Visualize + ?Sized> Visualize for &T {
    fn visualize<W: Write>(&self, drawer: Drawer<W>) -> Result<Drawer<W>> {
        (*self).visualize(drawer)
    }
}

impl<T: Visualize> Visualize for Option<T> {
    fn visualize<W: Write>(&self, mut drawer: Drawer<W>) -> Result<Drawer<W>> {
        match self {
            Some(v) => v.visualize(drawer),
            None => {
                drawer.write(b"None")?;
                Ok(drawer)
            }
        }
    }
}

/// Draw `value` to stderr.
pub fn visualize_stderr<T: Visualize + ?Sized>(value: &T) -> Result<()> {
    let mut drawer = value.visualize(Drawer::new(std::io::stderr()))?;
    drawer.flush()
}

/// Draw `value` into `v`.
pub fn visualize_to_vec<T: Visualize + ?Sized>(v: &mut Vec<u8>, value: &T) -> Result<()> {
    value.visualize(Drawer::new(v)).map(|_| ())
}

/// Draw `value` into a fresh string.
pub fn visualize_to_string<T: Visualize + ?Sized>(value: &T) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = visualize_to_vec(&mut buf, value);
    String::from_utf8_lossy(&buf).into_owned()
}
