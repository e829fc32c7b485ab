//! 設定エントリの解決
//!
//! コレクションからキーでエントリを検索します。エントリが見つからない
//! 場合は即座にエラーを返し、リソース構築には進みません。設定を修正して
//! 再実行することを前提とし、リトライやフォールバックは行いません。

use thiserror::Error;

/// ルックアップキーを持つ設定エントリ
pub trait Keyed {
    /// ルックアップに使用するキー
    fn key(&self) -> &str;
}

/// 設定解決エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// コレクション自体が未定義または空
    #[error("設定がありません: コレクション \"{collection}\" が定義されていないか空です")]
    ConfigurationMissing { collection: String },

    /// コレクションは存在するがキーに一致するエントリがない
    #[error("設定が見つかりません: コレクション \"{collection}\" にキー \"{key}\" のエントリがありません")]
    ConfigurationNotFound { collection: String, key: String },
}

/// コレクションからキーに一致する最初のエントリを返す
///
/// - コレクションが `None` または空の場合は `ConfigurationMissing`
/// - 一致するエントリがない場合は `ConfigurationNotFound`
///
/// キーの一意性は検査しません。重複がある場合は最初の一致が優先されます。
pub fn resolve<'a, T: Keyed>(
    collection: Option<&'a [T]>,
    collection_name: &str,
    key: &str,
) -> Result<&'a T, ResolveError> {
    let entries = match collection {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            return Err(ResolveError::ConfigurationMissing {
                collection: collection_name.to_string(),
            });
        }
    };

    entries
        .iter()
        .find(|entry| entry.key() == key)
        .ok_or_else(|| ResolveError::ConfigurationNotFound {
            collection: collection_name.to_string(),
            key: key.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Entry {
        key: String,
        name: String,
    }

    impl Entry {
        fn new(key: &str, name: &str) -> Self {
            Self {
                key: key.to_string(),
                name: name.to_string(),
            }
        }
    }

    impl Keyed for Entry {
        fn key(&self) -> &str {
            &self.key
        }
    }

    #[test]
    fn test_resolve_returns_matching_entry() {
        let entries = vec![Entry::new("a", "bucket-a"), Entry::new("b", "bucket-b")];

        let found = resolve(Some(&entries), "buckets", "a").unwrap();
        assert_eq!(found.name, "bucket-a");

        // 返り値はコレクション内のエントリそのもの（参照同一性）
        assert!(std::ptr::eq(found, &entries[0]));
    }

    #[test]
    fn test_resolve_first_match_wins() {
        // キーの重複は許容され、最初の一致が返る
        let entries = vec![Entry::new("a", "first"), Entry::new("a", "second")];

        let found = resolve(Some(&entries), "buckets", "a").unwrap();
        assert_eq!(found.name, "first");
        assert!(std::ptr::eq(found, &entries[0]));
    }

    #[test]
    fn test_resolve_missing_when_none() {
        let result = resolve::<Entry>(None, "buckets", "a");
        assert_eq!(
            result.unwrap_err(),
            ResolveError::ConfigurationMissing {
                collection: "buckets".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_missing_when_empty() {
        let entries: Vec<Entry> = Vec::new();
        let result = resolve(Some(&entries), "buckets", "a");
        assert_eq!(
            result.unwrap_err(),
            ResolveError::ConfigurationMissing {
                collection: "buckets".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_not_found() {
        let entries = vec![Entry::new("a", "bucket-a")];
        let result = resolve(Some(&entries), "buckets", "b");
        assert_eq!(
            result.unwrap_err(),
            ResolveError::ConfigurationNotFound {
                collection: "buckets".to_string(),
                key: "b".to_string()
            }
        );
    }

    #[test]
    fn test_error_message_names_collection_and_key() {
        let entries = vec![Entry::new("a", "bucket-a")];
        let err = resolve(Some(&entries), "buckets", "b").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("buckets"));
        assert!(message.contains("\"b\""));
    }
}
