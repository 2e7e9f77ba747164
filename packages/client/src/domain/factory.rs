//! Domain factories for creating value objects.

use super::TeamId;

/// Factory for generating TeamId instances.
pub struct TeamIdFactory;

impl TeamIdFactory {
    /// Generate a new TeamId with a random UUID v4.
    pub fn generate() -> TeamId {
        TeamId::from_uuid(uuid::Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_id_factory_generate() {
        // テスト項目: UUID v4 形式の TeamId を生成できる
        // when (操作):
        let team_id = TeamIdFactory::generate();

        // then (期待する結果):
        assert_eq!(team_id.as_str().len(), 36); // UUID v4 の標準長（ハイフン含む）
    }

    #[test]
    fn test_team_id_factory_generate_uniqueness() {
        // テスト項目: 毎回異なる ID を生成する
        // then (期待する結果):
        assert_ne!(TeamIdFactory::generate(), TeamIdFactory::generate());
    }
}
