//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// mineralmapクレート全体で使用するエラー型
///
/// このエラー型は、Excelファイルの読み込み、検証、マップ生成処理中に発生する
/// すべてのエラーを統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// 閉じたエラー分類により、呼び出し側はユーザーが修正可能な入力の問題
/// （列の未選択、座標形式の誤りなど）と環境的な失敗（I/Oエラーなど）を
/// 区別できます。
///
/// - `Io`: I/O操作中に発生したエラー（マップファイルの書き込み失敗など）
/// - `Parse`: Excelファイルの解析中に発生したエラー（calamine由来）
/// - `NoDataLoaded`: データ未読み込みの状態で生成を実行した
/// - `MissingColumnSelection`: 必須列（座標・名前）が未選択
/// - `ColumnNotFound`: 選択された列名がテーブルに存在しない
/// - `InvalidZoomLevel`: ズームレベルが整数として解析できない
/// - `NoOutputFolder`: 出力フォルダが未選択
/// - `InvalidCoordinate`: 座標セルが「数値,数値」形式でない
/// - `Limit`: 入力サイズ制限に違反した
///
/// # 使用例
///
/// ```rust,no_run
/// use mineralmap::MineralMapError;
/// use std::fs::File;
///
/// fn open_workbook(path: &str) -> Result<(), MineralMapError> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     // ... 処理 ...
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum MineralMapError {
    /// I/O操作中に発生したエラー
    ///
    /// マップファイルの書き込み失敗、入力ファイルの読み込み失敗など、
    /// 標準ライブラリの`std::io::Error`が発生した場合に使用されます。
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Excelファイルの解析中に発生したエラー
    ///
    /// calamineクレートがExcelファイルを解析する際に発生したエラーです。
    /// ファイル形式が不正、破損したファイルなどが原因となります。
    ///
    /// `#[from]`属性により、`calamine::Error`から自動的に変換されます。
    #[error("Failed to parse spreadsheet file: {0}")]
    Parse(#[from] calamine::Error),

    /// データ未読み込みエラー
    ///
    /// テーブルが読み込まれていない状態でマップ生成を実行した場合に発生します。
    #[error("No data loaded. Please select an input file.")]
    NoDataLoaded,

    /// 必須列の未選択エラー
    ///
    /// 座標列または名前列が選択されていない場合に発生します。
    /// 説明列は任意のため、未選択でもエラーになりません。
    #[error("Please select all required columns (coordinates, name).")]
    MissingColumnSelection,

    /// 列が存在しないエラー
    ///
    /// 選択された列名が、読み込まれたテーブルの列に存在しない場合に発生します。
    #[error("Selected column does not exist in the data: {0}")]
    ColumnNotFound(String),

    /// ズームレベルの解析エラー
    ///
    /// ズームレベルの文字列を整数に変換できなかった場合に発生します。
    ///
    /// `#[from]`属性により、`std::num::ParseIntError`から自動的に変換されます。
    #[error("Invalid zoom level: {0}")]
    InvalidZoomLevel(#[from] std::num::ParseIntError),

    /// 出力フォルダの未選択エラー
    #[error("Output folder not selected.")]
    NoOutputFolder,

    /// 座標形式の不正エラー
    ///
    /// 座標セルが「緯度,経度」（数値2つをカンマ区切り）の形式で解析できなかった
    /// 場合に発生します。エラーメッセージには問題のセルの生の値が含まれます。
    ///
    /// この失敗は即座に生成処理全体を中断します（フェイルファスト設計）。
    /// 部分的なマップが出力されることはありません。
    #[error("Invalid coordinate format in row: {0}")]
    InvalidCoordinate(String),

    /// 入力サイズ制限に違反したエラー
    ///
    /// 入力ファイルサイズや行数の上限を超えた場合に発生します。
    #[error("Limit exceeded: {0}")]
    Limit(String),

    /// 設定の検証に失敗したエラー
    ///
    /// `MapGeneratorBuilder::build()`時に設定を検証し、無効な設定が
    /// 検出された場合に発生します。例えば、カスタムタイルURLに
    /// 必要なプレースホルダーが含まれていない場合などです。
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MineralMapError {
    /// ユーザーの入力修正で解消できるエラーかどうかを判定
    ///
    /// フォーム側でのエラー表示の出し分けに使用します。`true`の場合は
    /// 入力内容の修正を促すメッセージ、`false`の場合は環境的な失敗として
    /// 扱うことを想定しています。
    pub fn is_user_correctable(&self) -> bool {
        !matches!(
            self,
            MineralMapError::Io(_) | MineralMapError::Limit(_) | MineralMapError::Config(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    // Ioエラーのテスト
    #[test]
    fn test_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: MineralMapError = io_err.into();

        match error {
            MineralMapError::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert_eq!(e.to_string(), "File not found");
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied");
        let error: MineralMapError = io_err.into();

        let error_msg = error.to_string();
        assert!(error_msg.contains("IO error"));
        assert!(error_msg.contains("Permission denied"));
    }

    // Parseエラーのテスト
    #[test]
    fn test_parse_error() {
        let parse_err = calamine::Error::Msg("Invalid file format");
        let error: MineralMapError = parse_err.into();

        match error {
            MineralMapError::Parse(calamine::Error::Msg(msg)) => {
                assert_eq!(msg, "Invalid file format");
            }
            _ => panic!("Expected Parse error"),
        }
    }

    #[test]
    fn test_parse_error_display() {
        let parse_err = calamine::Error::Msg("Corrupted file");
        let error: MineralMapError = parse_err.into();

        let error_msg = error.to_string();
        assert!(error_msg.contains("Failed to parse spreadsheet file"));
        assert!(error_msg.contains("Corrupted file"));
    }

    // ズームレベル解析エラーの変換テスト（?演算子の動作確認）
    #[test]
    fn test_zoom_error_conversion_with_question_mark() {
        fn parse_zoom(text: &str) -> Result<i64, MineralMapError> {
            Ok(text.trim().parse::<i64>()?)
        }

        assert_eq!(parse_zoom("6").unwrap(), 6);

        let result = parse_zoom("six");
        match result {
            Err(MineralMapError::InvalidZoomLevel(_)) => {}
            _ => panic!("Expected InvalidZoomLevel error from ? operator"),
        }
    }

    // 座標エラーのメッセージに生の値が含まれることの確認
    #[test]
    fn test_invalid_coordinate_message_contains_raw_value() {
        let error = MineralMapError::InvalidCoordinate("bad-data".to_string());
        let error_msg = error.to_string();
        assert!(error_msg.contains("Invalid coordinate format in row: bad-data"));
    }

    #[test]
    fn test_precondition_error_messages() {
        assert!(MineralMapError::NoDataLoaded
            .to_string()
            .contains("No data loaded"));
        assert!(MineralMapError::MissingColumnSelection
            .to_string()
            .contains("required columns"));
        assert!(MineralMapError::ColumnNotFound("Coords".to_string())
            .to_string()
            .contains("Coords"));
        assert!(MineralMapError::NoOutputFolder
            .to_string()
            .contains("Output folder not selected"));
    }

    // エラー分類のテスト
    #[test]
    fn test_is_user_correctable() {
        assert!(MineralMapError::NoDataLoaded.is_user_correctable());
        assert!(MineralMapError::MissingColumnSelection.is_user_correctable());
        assert!(MineralMapError::InvalidCoordinate("x".to_string()).is_user_correctable());

        let io_err: MineralMapError = io::Error::other("disk full").into();
        assert!(!io_err.is_user_correctable());
        assert!(!MineralMapError::Limit("too large".to_string()).is_user_correctable());
    }

    // エラーメッセージのフォーマット確認
    #[test]
    fn test_all_error_formats() {
        // Io
        let io_err: MineralMapError = io::Error::other("test io").into();
        assert!(io_err.to_string().starts_with("IO error"));

        // Parse
        let parse_err: MineralMapError = calamine::Error::Msg("test parse").into();
        assert!(parse_err
            .to_string()
            .starts_with("Failed to parse spreadsheet file"));

        // InvalidCoordinate
        let coord_err = MineralMapError::InvalidCoordinate("1.0;2.0".to_string());
        assert!(coord_err
            .to_string()
            .starts_with("Invalid coordinate format in row"));

        // Limit
        let limit_err = MineralMapError::Limit("test limit".to_string());
        assert!(limit_err.to_string().starts_with("Limit exceeded"));
    }
}
