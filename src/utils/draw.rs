//! 抽奖选择
//!
//! 生产路径只使用 `OsRng` (操作系统 CSPRNG)，结果对外部观察者不可预测、不可重放。
//! 泛型参数仅用于测试注入固定种子的生成器。

use rand::Rng;

/// 在 `[0, len)` 内均匀选出一个下标，`len == 0` 时返回 `None`
pub fn pick_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(rng.gen_range(0..len))
}
