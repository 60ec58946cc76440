use super::Tensor;
use std::ops::Index;

// 支持`tensor[[0, 1]]`这样的下标访问，下标个数须与张量阶数一致
impl<const N: usize> Index<[usize; N]> for Tensor {
    type Output = f32;

    fn index(&self, index: [usize; N]) -> &Self::Output {
        &self.data[&index[..]]
    }
}
