use astrostack_core::frame::PixelBuffer;

/// Opaque gray frame with every color sample set to `value`.
pub fn gray(width: usize, height: usize, value: u8) -> PixelBuffer {
    PixelBuffer::filled(width, height, [value, value, value, 255]).unwrap()
}

/// Black frame with a white `size`x`size` square whose top-left corner is at
/// `(x0, y0)`.
pub fn square(width: usize, height: usize, x0: usize, y0: usize, size: usize) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |x, y| {
        if (x0..x0 + size).contains(&x) && (y0..y0 + size).contains(&y) {
            [255, 255, 255, 255]
        } else {
            [0, 0, 0, 255]
        }
    })
    .unwrap()
}

/// Opaque frame whose color samples vary with position: `(x*7 + y*3) % 200 + bias`.
pub fn pattern(width: usize, height: usize, bias: u8) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |x, y| {
        let base = ((x * 7 + y * 3) % 200) as u8 + bias;
        [base, base / 2 + bias / 2, 255 - base, 255]
    })
    .unwrap()
}
