//! 統計量の計算
//!
//! 母平均・母標準偏差（n で割る）と、表示用の丸めを提供する。
//! 内部では丸めを行わず、丸めは結果を組み立てる側で適用する。

/// 母平均と母標準偏差
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Moments {
    pub mean: f64,
    pub std_dev: f64,
}

/// 母平均と母標準偏差を計算する
///
/// `σ = sqrt(Σv²/n − μ²)` を先頭値からの差分で計算するため、
/// 定数列では厳密に `σ = 0` になる。空の入力は平均 0、標準偏差 0。
pub fn moments<I>(values: I) -> Moments
where
    I: IntoIterator<Item = f64>,
{
    let mut iter = values.into_iter();
    let Some(first) = iter.next() else {
        return Moments::default();
    };

    let mut count = 1_usize;
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for v in iter {
        let d = v - first;
        count += 1;
        sum += d;
        sum_sq += d * d;
    }

    let n = count as f64;
    let shift = sum / n;
    let variance = (sum_sq / n - shift * shift).max(0.0);
    Moments {
        mean: first + shift,
        std_dev: variance.sqrt(),
    }
}

/// 平均値。空の入力は `None`
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut iter = values.into_iter();
    let first = iter.next()?;
    let mut count = 1_usize;
    let mut sum = 0.0;
    for v in iter {
        count += 1;
        sum += v - first;
    }
    Some(first + sum / count as f64)
}

/// 小数点以下 `decimals` 桁に丸める（0.5 は 0 から遠い方へ）
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    // -0.0 を 0.0 に正規化
    (value * factor).round() / factor + 0.0
}
