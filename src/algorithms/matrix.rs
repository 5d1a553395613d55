// 行列演算 - 行単位の並列計算と行の再配置

use crate::core::{BenchError, BenchResult, CancellationToken, Element, PartitionableTask, Segment};
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 生成する値の範囲
pub const MATRIX_VALUE_RANGE: std::ops::RangeInclusive<Element> = 1..=100;

const NO_MISMATCH: usize = usize::MAX;

pub type Row = Vec<Element>;

/// 正方行列（行の長さは全て `dimension`）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Matrix {
    rows: Vec<Row>,
}

impl Matrix {
    /// 行のリストから正方行列を作る
    pub fn from_rows(rows: Vec<Row>) -> BenchResult<Self> {
        let dimension = rows.len();
        if let Some(index) = rows.iter().position(|row| row.len() != dimension) {
            return Err(BenchError::configuration(format!(
                "行 {index} の長さが {dimension} ではありません"
            )));
        }
        Ok(Self { rows })
    }

    fn random(dimension: usize, rng: &mut StdRng) -> BenchResult<Self> {
        dimension.checked_mul(dimension).ok_or_else(|| {
            BenchError::allocation("matrix", format!("{dimension} x {dimension} がオーバーフローします"))
        })?;

        let mut rows = Vec::new();
        rows.try_reserve_exact(dimension)?;
        for _ in 0..dimension {
            let mut row = Vec::new();
            row.try_reserve_exact(dimension)?;
            row.extend((0..dimension).map(|_| rng.gen_range(MATRIX_VALUE_RANGE)));
            rows.push(row);
        }
        Ok(Self { rows })
    }

    pub fn dimension(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> &[Element] {
        &self.rows[index]
    }

    pub fn get(&self, row: usize, col: usize) -> Element {
        self.rows[row][col]
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

/// 行列演算の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixOp {
    /// A × A
    Multiply,
    /// A + B（要素ごとの和）
    Add,
    /// Aᵀ
    Transpose,
}

impl MatrixOp {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Multiply => "matrix_multiplication",
            Self::Add => "matrix_addition",
            Self::Transpose => "matrix_transpose",
        }
    }

    /// 出力の1行を全入力から計算する
    fn compute_row(&self, input: &MatrixInput, index: usize) -> BenchResult<Row> {
        let lhs = &input.lhs;
        let n = lhs.dimension();
        let mut row = Vec::new();
        row.try_reserve_exact(n)?;

        match self {
            Self::Multiply => {
                let source = lhs.row(index);
                row.extend((0..n).map(|col| {
                    source
                        .iter()
                        .enumerate()
                        .map(|(k, &value)| value * lhs.get(k, col))
                        .sum::<Element>()
                }));
            }
            Self::Add => {
                let rhs = input.rhs.as_ref().ok_or_else(|| {
                    BenchError::configuration("行列加算には2つ目の行列が必要です")
                })?;
                row.extend(lhs.row(index).iter().zip(rhs.row(index)).map(|(a, b)| a + b));
            }
            Self::Transpose => {
                row.extend((0..n).map(|col| lhs.get(col, index)));
            }
        }
        Ok(row)
    }
}

/// 行列演算の入力（加算のみ2つ目の行列を持つ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixInput {
    pub lhs: Matrix,
    pub rhs: Option<Matrix>,
}

impl MatrixInput {
    pub fn dimension(&self) -> usize {
        self.lhs.dimension()
    }
}

/// 行列演算のベンチマークタスク
///
/// データサイズは行列の次元。セグメントは行の範囲で、
/// 各ワーカーは共有された入力全体を読み、自分の行だけを新しく確保して返す。
#[derive(Debug)]
pub struct MatrixTask {
    op: MatrixOp,
    mismatch: AtomicUsize,
}

impl MatrixTask {
    pub fn new(op: MatrixOp) -> Self {
        Self {
            op,
            mismatch: AtomicUsize::new(NO_MISMATCH),
        }
    }

    pub fn op(&self) -> MatrixOp {
        self.op
    }

    /// 直近の検証で一致しなかった最初の行
    pub fn last_mismatch(&self) -> Option<usize> {
        match self.mismatch.load(Ordering::Acquire) {
            NO_MISMATCH => None,
            row => Some(row),
        }
    }

    /// 並列化とは別経路の素朴な計算
    fn reference(&self, input: &MatrixInput) -> Option<Vec<Row>> {
        let lhs = &input.lhs;
        let n = lhs.dimension();
        match self.op {
            MatrixOp::Multiply => {
                let mut product = vec![vec![0; n]; n];
                for i in 0..n {
                    for k in 0..n {
                        let a = lhs.get(i, k);
                        for j in 0..n {
                            product[i][j] += a * lhs.get(k, j);
                        }
                    }
                }
                Some(product)
            }
            MatrixOp::Add => {
                let rhs = input.rhs.as_ref()?;
                Some(
                    (0..n)
                        .map(|i| (0..n).map(|j| lhs.get(i, j) + rhs.get(i, j)).collect())
                        .collect(),
                )
            }
            MatrixOp::Transpose => {
                let mut transposed = vec![vec![0; n]; n];
                for (i, row) in lhs.rows().iter().enumerate() {
                    for (j, &value) in row.iter().enumerate() {
                        transposed[j][i] = value;
                    }
                }
                Some(transposed)
            }
        }
    }
}

impl PartitionableTask for MatrixTask {
    type Buffer = MatrixInput;
    type View<'a> = &'a MatrixInput where Self: 'a;
    type Partial = Vec<Row>;
    type Output<'a> = Matrix where Self: 'a;

    fn name(&self) -> &'static str {
        self.op.name()
    }

    fn generate_data(&mut self, size: usize, rng: &mut StdRng) -> BenchResult<MatrixInput> {
        let lhs = Matrix::random(size, rng)?;
        let rhs = match self.op {
            MatrixOp::Add => Some(Matrix::random(size, rng)?),
            MatrixOp::Multiply | MatrixOp::Transpose => None,
        };
        self.mismatch.store(NO_MISMATCH, Ordering::Release);
        Ok(MatrixInput { lhs, rhs })
    }

    fn views<'a>(&self, buffer: &'a mut MatrixInput, segments: &[Segment]) -> Vec<&'a MatrixInput>
    where
        Self: 'a,
    {
        let shared: &'a MatrixInput = buffer;
        vec![shared; segments.len()]
    }

    fn execute_on_segment(
        &self,
        segment: Segment,
        view: &MatrixInput,
        _cancel: &CancellationToken,
    ) -> BenchResult<Vec<Row>> {
        let mut rows = Vec::new();
        rows.try_reserve_exact(segment.len())?;
        for index in segment.range() {
            rows.push(self.op.compute_row(view, index)?);
        }
        Ok(rows)
    }

    fn merge<'a>(
        &self,
        partials: Vec<Vec<Row>>,
        buffer: &'a MatrixInput,
        segments: &[Segment],
    ) -> BenchResult<Matrix>
    where
        Self: 'a,
    {
        let mut rows: Vec<Row> = Vec::new();
        rows.try_reserve_exact(buffer.dimension())?;
        rows.resize_with(buffer.dimension(), Vec::new);

        // 失敗したセグメントの行は空のまま残り、検証で不一致になる
        for (segment, partial) in segments.iter().zip(partials) {
            for (index, row) in segment.range().zip(partial) {
                rows[index] = row;
            }
        }

        Ok(Matrix { rows })
    }

    fn verify(&self, input: &MatrixInput, result: &Matrix, size: usize) -> bool {
        let mismatch = match self.reference(input) {
            Some(expected) if result.dimension() == size && expected.len() == size => expected
                .iter()
                .zip(result.rows())
                .position(|(expected, actual)| expected != actual),
            Some(_) | None => Some(0),
        };
        self.mismatch
            .store(mismatch.unwrap_or(NO_MISMATCH), Ordering::Release);
        mismatch.is_none()
    }

    fn outcome_note(&self) -> Option<String> {
        self.last_mismatch()
            .map(|row| format!("matrix row {row} does not match the reference"))
    }
}
