use crate::domain::model::{Money, RoomId};

/// 客室カタログのエントリ
/// 外部のカタログ管理プロセスが作成・更新する。エンジンからは読み取り専用
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    id: RoomId,
    name: String,
    room_type: String,
    description: String,
    image_url: String,
    base_price_single: Money,
    base_price_double: Money,
    extra_adult: Money,
    extra_child: Money,
    amenities: Vec<String>,
    max_occupancy: u32,
}

impl Room {
    /// 新しい客室カタログエントリを作成
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: RoomId,
        name: String,
        room_type: String,
        description: String,
        image_url: String,
        base_price_single: Money,
        base_price_double: Money,
        extra_adult: Money,
        extra_child: Money,
        amenities: Vec<String>,
        max_occupancy: u32,
    ) -> Self {
        Self {
            id,
            name,
            room_type,
            description,
            image_url,
            base_price_single,
            base_price_double,
            extra_adult,
            extra_child,
            amenities,
            max_occupancy,
        }
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn room_type(&self) -> &str {
        &self.room_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// 大人1人・子供0人の場合の1泊あたり基本料金
    pub fn base_price_single(&self) -> Money {
        self.base_price_single
    }

    /// 上記以外の場合の1泊あたり基本料金
    pub fn base_price_double(&self) -> Money {
        self.base_price_double
    }

    /// 3人目以降の大人1人あたりの追加料金
    pub fn extra_adult(&self) -> Money {
        self.extra_adult
    }

    /// 子供1人あたりの追加料金
    pub fn extra_child(&self) -> Money {
        self.extra_child
    }

    pub fn amenities(&self) -> &[String] {
        &self.amenities
    }

    /// 最大定員（1以上）
    pub fn max_occupancy(&self) -> u32 {
        self.max_occupancy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_creation() {
        let room = Room::new(
            RoomId::new("R1").unwrap(),
            "Deluxe Queen Room".to_string(),
            "deluxe".to_string(),
            "A spacious room with a queen-sized bed.".to_string(),
            "https://example.com/r1.jpg".to_string(),
            Money::usd(15000),
            Money::usd(18000),
            Money::usd(5000),
            Money::usd(2500),
            vec!["Free WiFi".to_string(), "Air Conditioning".to_string()],
            3,
        );
        assert_eq!(room.id().as_str(), "R1");
        assert_eq!(room.base_price_single().amount_cents(), 15000);
        assert_eq!(room.max_occupancy(), 3);
        assert_eq!(room.amenities().len(), 2);
    }
}
