//! End to end scenarios for threshold decryption and signing.

#[cfg(test)]
mod tests;
