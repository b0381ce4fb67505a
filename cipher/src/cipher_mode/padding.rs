use crate::CipherError;

pub trait BlockPadding {
    /// 填充到`block_size`字节的整数倍
    fn new(block_size: usize) -> Self;

    fn padding(&self, buf: &mut Vec<u8>);

    fn unpadding(&self, buf: &mut Vec<u8>) -> Result<(), CipherError>;
}

/// PKCS#7: 补充n个值为n的字节, 1 <= n <= block_size. 已对齐的数据补一整块. <br>
#[derive(Copy, Clone, Debug)]
pub struct Pkcs7Padding {
    block_size: usize,
}

impl BlockPadding for Pkcs7Padding {
    fn new(block_size: usize) -> Self {
        Self { block_size }
    }

    fn padding(&self, buf: &mut Vec<u8>) {
        let n = self.block_size - (buf.len() % self.block_size);
        buf.resize(buf.len() + n, n as u8);
    }

    fn unpadding(&self, buf: &mut Vec<u8>) -> Result<(), CipherError> {
        let n = buf.last().copied().unwrap_or(0) as usize;
        let valid = n >= 1
            && n <= self.block_size
            && n <= buf.len()
            && buf[buf.len() - n..].iter().all(|&b| b as usize == n);

        if valid {
            buf.truncate(buf.len() - n);
            Ok(())
        } else {
            Err(CipherError::UnpaddingNotMatch("Pkcs7Padding".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BlockPadding, Pkcs7Padding};

    #[test]
    fn pkcs7() {
        let p = Pkcs7Padding::new(16);
        for len in [0usize, 1, 15, 16, 17, 32] {
            let data = vec![0xabu8; len];
            let mut buf = data.clone();
            p.padding(&mut buf);
            assert_eq!(buf.len() % 16, 0);
            assert!(buf.len() > len && buf.len() <= len + 16);
            p.unpadding(&mut buf).unwrap();
            assert_eq!(buf, data);
        }

        let mut buf = b"YELLOW SUBMARINE".to_vec();
        p.padding(&mut buf);
        assert_eq!(&buf[16..], &[16u8; 16]);
    }

    #[test]
    fn bad_padding() {
        let p = Pkcs7Padding::new(16);
        let cases: [&[u8]; 4] = [b"", &[0u8; 16], &[17u8; 16], b"ICE ICE BABY\x01\x02\x03\x04"];
        for case in cases {
            let mut buf = case.to_vec();
            assert!(p.unpadding(&mut buf).is_err(), "{case:?}");
        }
    }
}
