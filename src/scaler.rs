use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Precomputed source row/column for every destination pixel
#[derive(Debug, Clone, Default)]
pub struct ScaleLut {
    src_x: Vec<usize>,
    src_y: Vec<usize>,
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn dst_width(&self) -> usize {
        self.src_x.len()
    }

    pub fn dst_height(&self) -> usize {
        self.src_y.len()
    }
}

/// Nearest-neighbour mapping that stretches `src_w x src_h` over `dst_w x dst_h`.
pub fn build_scale_lut(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> ScaleLut {
    let axis = |dst: usize, src: usize| -> Vec<usize> {
        (0..dst)
            .map(|d| {
                // sample at destination pixel centres
                let s = ((d as f32 + 0.5) * src as f32 / dst as f32) as usize;
                s.min(src.saturating_sub(1))
            })
            .collect()
    };

    ScaleLut {
        src_x: axis(dst_w, src_w),
        src_y: axis(dst_h, src_h),
    }
}

/// Parallel nearest-neighbour stretch
/// Rows are processed in parallel for cache friendly writes
pub fn blit_stretch(dst: &mut [u32], dw: usize, src: &[u32], sw: usize, lut: &ScaleLut) {
    debug_assert_eq!(dw, lut.dst_width());
    dst.par_chunks_mut(dw).enumerate().for_each(|(y, dst_row)| {
        let Some(&sy) = lut.src_y.get(y) else {
            return;
        };
        let src_row = &src[sy * sw..(sy + 1) * sw];
        for (d, &sx) in dst_row.iter_mut().zip(&lut.src_x) {
            *d = src_row[sx];
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_each_pixel() {
        let lut = build_scale_lut(4, 2, 2, 1);
        let src = [1, 2];
        let mut dst = [0; 8];
        blit_stretch(&mut dst, 4, &src, 2, &lut);
        assert_eq!(dst, [1, 1, 2, 2, 1, 1, 2, 2]);
    }

    #[test]
    fn shrinks_without_going_out_of_bounds() {
        let lut = build_scale_lut(3, 1, 7, 5);
        assert_eq!(lut.src_x, vec![1, 3, 5]);
        assert_eq!(lut.src_y, vec![2]);
    }

    #[test]
    fn odd_factor() {
        let lut = build_scale_lut(5, 1, 2, 1);
        assert_eq!(lut.src_x, vec![0, 0, 1, 1, 1]);
    }
}
