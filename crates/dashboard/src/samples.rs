//! Built-in demo catalogue shown while a user has no content of their own.

use chrono::{DateTime, Utc};

use keizok_core::{ContentId, ContentType, SocialPlatform, UserId};

use crate::models::GeneratedContent;

struct Sample {
    id: &'static str,
    product_name: &'static str,
    product_description: &'static str,
    content_type: ContentType,
    generated_url: &'static str,
    caption: &'static str,
    hashtags: &'static str,
}

const SAMPLES: [Sample; 9] = [
    Sample {
        id: "1",
        product_name: "オーガニックコットンTシャツ",
        product_description: "環境に優しい100%オーガニックコットン",
        content_type: ContentType::Image,
        generated_url: "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=800&h=800&fit=crop",
        caption: "地球にやさしい、肌にやさしい🌿\n\n100%オーガニックコットンで作られたこのTシャツは、着心地の良さと環境配慮を両立。毎日のワードローブに、サステナブルな選択を。",
        hashtags: "#オーガニックコットン #サステナブルファッション #エコフレンドリー #ナチュラル素材 #地球にやさしい #オーガニック #エシカルファッション #環境配慮",
    },
    Sample {
        id: "2",
        product_name: "ハンドメイドレザーバッグ",
        product_description: "職人が一つ一つ丁寧に作る本革バッグ",
        content_type: ContentType::Image,
        generated_url: "https://images.unsplash.com/photo-1590874103328-eac38a683ce7?w=800&h=800&fit=crop",
        caption: "職人の技が光る、一生モノのレザーバッグ✨\n\n熟練の職人が一つひとつ丁寧に仕上げた本革バッグ。使うほどに味わいが増し、あなただけの色に育っていきます。長く愛用できる、本物の品質をお届けします。",
        hashtags: "#ハンドメイドレザー #本革バッグ #職人技 #レザークラフト #一生モノ #革製品 #ハンドメイドバッグ #こだわりの逸品",
    },
    Sample {
        id: "3",
        product_name: "アロマキャンドルセット",
        product_description: "天然素材100%のリラックスキャンドル",
        content_type: ContentType::Image,
        generated_url: "https://images.unsplash.com/photo-1602874801006-94d00c7d1f9d?w=800&h=800&fit=crop",
        caption: "忙しい毎日に、癒しのひとときを🕯️\n\n天然素材100%のアロマキャンドルで、心からリラックス。やさしい香りに包まれて、自分だけの特別な時間を過ごしませんか？",
        hashtags: "#アロマキャンドル #リラックスタイム #天然素材 #癒しの時間 #おうち時間 #アロマセラピー #自分時間 #キャンドルのある暮らし",
    },
    Sample {
        id: "4",
        product_name: "スマートウォッチ",
        product_description: "健康管理とスタイルを両立する最新モデル",
        content_type: ContentType::Image,
        generated_url: "https://images.unsplash.com/photo-1579586337278-3befd40fd17a?w=800&h=800&fit=crop",
        caption: "健康管理もスタイルも妥協しない⌚️\n\n最新のスマートウォッチで、毎日をもっとアクティブに。心拍数、睡眠、運動量を自動記録。スタイリッシュなデザインで、どんなシーンにもマッチします。",
        hashtags: "#スマートウォッチ #健康管理 #フィットネス #ウェアラブル #ヘルスケア #アクティブライフ #テクノロジー #最新ガジェット",
    },
    Sample {
        id: "5",
        product_name: "プレミアムコーヒー豆",
        product_description: "厳選された単一農園の最高級豆",
        content_type: ContentType::Image,
        generated_url: "https://images.unsplash.com/photo-1559056199-641a0ac8b55e?w=800&h=800&fit=crop",
        caption: "一杯のコーヒーから始まる、特別な朝☕️\n\n単一農園で丁寧に育てられた最高級のコーヒー豆。豊かな香りと深い味わいで、いつもの朝をワンランク上の時間に。",
        hashtags: "#プレミアムコーヒー #スペシャルティコーヒー #コーヒー好き #単一農園 #コーヒーのある暮らし #朝のコーヒー #珈琲時間 #コーヒー豆",
    },
    Sample {
        id: "6",
        product_name: "ヨガマット",
        product_description: "滑り止め加工付きの高品質マット",
        content_type: ContentType::Image,
        generated_url: "https://images.unsplash.com/photo-1601925260368-ae2f83cf8b7f?w=800&h=800&fit=crop",
        caption: "おうちヨガで、心も体もリフレッシュ🧘‍♀️\n\n滑り止め加工でしっかりグリップ、安定したポーズをサポート。厚さ6mmのクッションで膝や関節もやさしく守ります。あなたのヨガライフを快適に。",
        hashtags: "#ヨガマット #おうちヨガ #ヨガのある暮らし #ヨガ好き #フィットネス #ヨガライフ #ホームヨガ #ヨガ女子",
    },
    Sample {
        id: "7",
        product_name: "ワイヤレスイヤホン",
        product_description: "ノイズキャンセリング機能搭載",
        content_type: ContentType::Video,
        generated_url: "https://images.unsplash.com/photo-1590658268037-6bf12165a8df?w=800&h=800&fit=crop",
        caption: "世界が静かになる、そんな瞬間を🎧\n\nノイズキャンセリング機能で周囲の雑音をカット。音楽も通話もクリアに。通勤時間が、あなただけの特別な時間に変わります。",
        hashtags: "#ワイヤレスイヤホン #ノイズキャンセリング #音楽好き #オーディオ #ガジェット #通勤時間 #高音質 #Bluetooth",
    },
    Sample {
        id: "8",
        product_name: "スキンケアセット",
        product_description: "自然派スキンケアの決定版",
        content_type: ContentType::Image,
        generated_url: "https://images.unsplash.com/photo-1556228578-0d85b1a4d571?w=800&h=800&fit=crop",
        caption: "自然の力で、本来の美しさを引き出す🌸\n\n植物由来成分たっぷりの自然派スキンケア。お肌にやさしく、しっかり潤う。毎日のケアが、楽しみな時間に変わります。",
        hashtags: "#スキンケア #自然派コスメ #ナチュラルスキンケア #植物由来 #オーガニックコスメ #美容 #スキンケアルーティン #敏感肌",
    },
    Sample {
        id: "9",
        product_name: "デザイナーズチェア",
        product_description: "人間工学に基づいた快適設計",
        content_type: ContentType::Image,
        generated_url: "https://images.unsplash.com/photo-1580480055273-228ff5388ef8?w=800&h=800&fit=crop",
        caption: "座り心地とデザイン、どちらも妥協しない🪑\n\n人間工学に基づいた設計で、長時間座っても疲れにくい。インテリアに溶け込む洗練されたデザインで、お部屋をワンランクアップ。",
        hashtags: "#デザイナーズチェア #インテリア #人間工学 #家具 #おしゃれな部屋 #インテリアデザイン #北欧家具 #チェア",
    },
];

/// The demo posts, owned by `user` and stamped with `now`.
#[must_use]
pub fn sample_contents(user: &UserId, now: DateTime<Utc>) -> Vec<GeneratedContent> {
    SAMPLES
        .iter()
        .map(|s| GeneratedContent {
            id: ContentId::new(s.id),
            user_id: user.clone(),
            ec_site_id: None,
            product_name: s.product_name.to_owned(),
            product_description: Some(s.product_description.to_owned()),
            product_image_url: None,
            platform: SocialPlatform::Instagram,
            content_type: s.content_type,
            generated_url: s.generated_url.to_owned(),
            generated_caption: Some(s.caption.to_owned()),
            generated_hashtags: Some(s.hashtags.to_owned()),
            prompt_used: None,
            metadata: serde_json::Value::Null,
            created_at: now,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_shape() {
        let user = UserId::new("mock-user-123");
        let samples = sample_contents(&user, Utc::now());
        assert_eq!(samples.len(), 9);
        assert!(samples.iter().all(|s| s.user_id == user));

        let videos: Vec<_> = samples
            .iter()
            .filter(|s| s.content_type == ContentType::Video)
            .map(|s| s.product_name.as_str())
            .collect();
        assert_eq!(videos, vec!["ワイヤレスイヤホン"]);
    }

    #[test]
    fn test_every_sample_has_caption_and_hashtags() {
        for sample in sample_contents(&UserId::new("u"), Utc::now()) {
            assert!(sample.generated_caption.as_deref().is_some_and(|c| c.contains("\n\n")));
            assert!(sample.hashtags().iter().all(|t| t.starts_with('#')));
        }
    }
}
