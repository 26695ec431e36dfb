// Copyright 2018 Kodebox, Inc.
// This file is part of CodeChain.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use primitives::H256;

pub fn blake256<T: AsRef<[u8]>>(s: T) -> H256 {
    H256::blake(s)
}

pub trait Blake {
    fn blake<T: AsRef<[u8]>>(s: T) -> Self;
}

impl Blake for H256 {
    fn blake<T: AsRef<[u8]>>(s: T) -> Self {
        // Blake2b parameterized with a 32-byte digest, not a truncated Blake2b-512.
        let digest = Blake2b::<U32>::digest(s.as_ref());
        H256::from_slice(&digest)
    }
}

pub const BLAKE_EMPTY: H256 = H256([
    0x0e, 0x57, 0x51, 0xc0, 0x26, 0xe5, 0x43, 0xb2, 0xe8, 0xab, 0x2e, 0xb0, 0x60, 0x99, 0xda, 0xa1, 0xd1, 0xe5, 0xdf,
    0x47, 0x77, 0x8f, 0x77, 0x87, 0xfa, 0xab, 0x45, 0xcd, 0xf1, 0x2f, 0xe3, 0xa8,
]);
