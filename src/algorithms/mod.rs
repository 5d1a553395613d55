// アルゴリズム層 - PartitionableTask の具体的な実装
// ソート・探索・行列演算の3ファミリー、各ファミリーは戦略値で切り替える

pub mod matrix;
pub mod searching;
pub mod sorting;

pub use matrix::{Matrix, MatrixInput, MatrixOp, MatrixTask};
pub use searching::{ScanOutcome, SearchStrategy, SearchingTask};
pub use sorting::{SortStrategy, SortingTask};

use crate::core::BenchError;
use std::fmt;
use std::str::FromStr;

/// CLIから選択できるアルゴリズム
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    BubbleSort,
    QuickSort,
    MergeSort,
    InsertionSort,
    SelectionSort,
    HeapSort,
    MatrixMultiplication,
    MatrixAddition,
    MatrixTranspose,
    LinearSearch,
    BinarySearch,
}

/// アルゴリズムのファミリー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmFamily {
    Sorting(SortStrategy),
    Searching(SearchStrategy),
    Matrix(MatrixOp),
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 11] = [
        Self::BubbleSort,
        Self::QuickSort,
        Self::MergeSort,
        Self::InsertionSort,
        Self::SelectionSort,
        Self::HeapSort,
        Self::MatrixMultiplication,
        Self::MatrixAddition,
        Self::MatrixTranspose,
        Self::LinearSearch,
        Self::BinarySearch,
    ];

    pub const fn family(&self) -> AlgorithmFamily {
        match self {
            Self::BubbleSort => AlgorithmFamily::Sorting(SortStrategy::Bubble),
            Self::QuickSort => AlgorithmFamily::Sorting(SortStrategy::Quick),
            Self::MergeSort => AlgorithmFamily::Sorting(SortStrategy::Merge),
            Self::InsertionSort => AlgorithmFamily::Sorting(SortStrategy::Insertion),
            Self::SelectionSort => AlgorithmFamily::Sorting(SortStrategy::Selection),
            Self::HeapSort => AlgorithmFamily::Sorting(SortStrategy::Heap),
            Self::MatrixMultiplication => AlgorithmFamily::Matrix(MatrixOp::Multiply),
            Self::MatrixAddition => AlgorithmFamily::Matrix(MatrixOp::Add),
            Self::MatrixTranspose => AlgorithmFamily::Matrix(MatrixOp::Transpose),
            Self::LinearSearch => AlgorithmFamily::Searching(SearchStrategy::Linear),
            Self::BinarySearch => AlgorithmFamily::Searching(SearchStrategy::Binary),
        }
    }

    /// CLI・JSON出力で使う名前
    pub const fn name(&self) -> &'static str {
        match self.family() {
            AlgorithmFamily::Sorting(strategy) => strategy.name(),
            AlgorithmFamily::Searching(strategy) => strategy.name(),
            AlgorithmFamily::Matrix(op) => op.name(),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = BenchError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| BenchError::unknown_algorithm(name))
    }
}
