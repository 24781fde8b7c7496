use crate::BitVector;
use crate::index::BitIndex;

/// Iterator over the appended bits of a [`BitVector`], first bit first.
pub struct Iter<'a> {
    vector: &'a BitVector,
    index: usize,
    end: usize,
}

impl BitVector {
    /// Iterates over the first [`size`](Self::size) bits.
    ///
    /// ```
    /// use bit_vector::BitVector;
    ///
    /// let mut bits = BitVector::new(8);
    /// bits.append(0b101, 3).unwrap();
    /// let collected: Vec<bool> = bits.iter().collect();
    /// assert_eq!(collected, vec![true, false, true]);
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            vector: self,
            index: 0,
            end: self.size_bits,
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.end {
            None
        } else {
            let bit = self.vector.bit(BitIndex(self.index));
            self.index += 1;
            Some(bit)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.index >= self.end {
            None
        } else {
            self.end -= 1;
            Some(self.vector.bit(BitIndex(self.end)))
        }
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {}

impl<'a> IntoIterator for &'a BitVector {
    type Item = bool;
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
