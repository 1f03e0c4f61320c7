//! Batched streaming encryption and decryption.

use std::io::{Read, Write};

use saes_core::{KeySize, SeededAes, BLOCK_LENGTH};

use crate::error::Error;
use crate::mode::ChainMode;

/// Streams arbitrary-length input through the block cipher in one of the four
/// chaining modes.
///
/// Input is consumed in batches of `batch_size` blocks. The final block of a
/// stream may be shorter than 16 bytes; it is zero-padded for the block
/// operation and the output is truncated back to the real input length, so a
/// stream transformation always preserves length. A fresh all-zero chain
/// register (an implicit zero IV) is used per stream call.
#[derive(Clone, Debug)]
pub struct StreamCipher {
    cipher: SeededAes,
    mode: ChainMode,
    batch_size: usize,
}

impl StreamCipher {
    /// Builds a stream cipher from the S-box seed, key parameters, raw key,
    /// chain mode, and I/O batch size in blocks.
    pub fn new(
        seed: u64,
        size: KeySize,
        key: &[u8],
        mode: ChainMode,
        batch_size: usize,
    ) -> Result<Self, Error> {
        if batch_size == 0 {
            return Err(Error::ZeroBatchSize);
        }
        Ok(Self {
            cipher: SeededAes::new(seed, size, key)?,
            mode,
            batch_size,
        })
    }

    /// The active chaining mode.
    pub fn mode(&self) -> ChainMode {
        self.mode
    }

    /// Encrypts the whole input stream into the output stream.
    pub fn encrypt<R, W>(&self, input: &mut R, output: &mut W) -> Result<(), Error>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        self.process(input, output, true)
    }

    /// Decrypts the whole input stream into the output stream.
    pub fn decrypt<R, W>(&self, input: &mut R, output: &mut W) -> Result<(), Error>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        self.process(input, output, false)
    }

    fn process<R, W>(&self, input: &mut R, output: &mut W, encrypting: bool) -> Result<(), Error>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        let mut buffer = vec![0u8; self.batch_size * BLOCK_LENGTH];
        let mut chain = [0u8; BLOCK_LENGTH];
        loop {
            let filled = read_batch(input, &mut buffer)?;
            if filled == 0 {
                break;
            }
            for chunk in buffer[..filled].chunks(BLOCK_LENGTH) {
                let transformed = if encrypting {
                    self.encrypt_chunk(chunk, &mut chain)?
                } else {
                    self.decrypt_chunk(chunk, &mut chain)?
                };
                output.write_all(&transformed[..chunk.len()])?;
            }
        }
        output.flush()?;
        Ok(())
    }

    fn encrypt_chunk(
        &self,
        chunk: &[u8],
        chain: &mut [u8; BLOCK_LENGTH],
    ) -> Result<[u8; BLOCK_LENGTH], Error> {
        match self.mode {
            ChainMode::Ecb => Ok(self.cipher.encrypt_block(chunk)?),
            ChainMode::Cbc => {
                let mut block = zero_pad(chunk);
                xor_in_place(&mut block, chain);
                let encrypted = self.cipher.encrypt_block(&block)?;
                *chain = encrypted;
                Ok(encrypted)
            }
            ChainMode::Ofb => {
                let keystream = self.cipher.encrypt_block(chain)?;
                *chain = keystream;
                let mut block = zero_pad(chunk);
                xor_in_place(&mut block, &keystream);
                Ok(block)
            }
            ChainMode::Cfb => {
                let keystream = self.cipher.encrypt_block(chain)?;
                let mut block = zero_pad(chunk);
                xor_in_place(&mut block, &keystream);
                *chain = block;
                Ok(block)
            }
        }
    }

    fn decrypt_chunk(
        &self,
        chunk: &[u8],
        chain: &mut [u8; BLOCK_LENGTH],
    ) -> Result<[u8; BLOCK_LENGTH], Error> {
        match self.mode {
            ChainMode::Ecb => Ok(self.cipher.decrypt_block(chunk)?),
            ChainMode::Cbc => {
                let ciphertext = zero_pad(chunk);
                let mut block = self.cipher.decrypt_block(chunk)?;
                xor_in_place(&mut block, chain);
                *chain = ciphertext;
                Ok(block)
            }
            // the keystream XOR is self-inverse
            ChainMode::Ofb => self.encrypt_chunk(chunk, chain),
            ChainMode::Cfb => {
                let keystream = self.cipher.encrypt_block(chain)?;
                let mut block = zero_pad(chunk);
                xor_in_place(&mut block, &keystream);
                *chain = zero_pad(chunk);
                Ok(block)
            }
        }
    }
}

/// Fills as much of `buffer` as the input can provide; a zero-length read
/// signals end of stream. Interrupted reads are retried, as in
/// [`Read::read_exact`].
fn read_batch<R: Read + ?Sized>(input: &mut R, buffer: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match input.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(count) => filled += count,
            Err(error) if error.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        }
    }
    Ok(filled)
}

fn zero_pad(chunk: &[u8]) -> [u8; BLOCK_LENGTH] {
    let mut block = [0u8; BLOCK_LENGTH];
    block[..chunk.len()].copy_from_slice(chunk);
    block
}

fn xor_in_place(dst: &mut [u8; BLOCK_LENGTH], rhs: &[u8; BLOCK_LENGTH]) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}
