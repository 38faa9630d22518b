//! Generated posts
//!
//! Stand-in content for accounts whose live posts are unavailable, so the
//! rest of the pipeline sees the same shape whatever the credential state.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::data::{Post, PostMetrics};

/// Posts generated per call (inclusive)
pub const POSTS_PER_CALL: std::ops::RangeInclusive<usize> = 3..=5;
/// Age of a generated post, in hours (inclusive)
pub const AGE_HOURS: std::ops::RangeInclusive<i64> = 1..=168;
pub const LIKE_COUNT: std::ops::RangeInclusive<u64> = 500..=10_000;
pub const RETWEET_COUNT: std::ops::RangeInclusive<u64> = 100..=2_000;
pub const REPLY_COUNT: std::ops::RangeInclusive<u64> = 50..=500;

const SAYLOR: &[&str] = &[
    "Bitcoin is digital energy. Energy is the fundamental unit of the physical universe. #Bitcoin is the fundamental unit of the monetary universe.",
    "There is no second best. #Bitcoin is the apex digital monetary asset of the human race.",
    "If you're going to invest in Bitcoin, a long time horizon is advantageous. I recommend a century.",
    "$BTC is hope for billions of people that need a treasury that cannot be debased or seized.",
    "The network effect of #Bitcoin increases with each new hodler. The future is digital gold.",
];

const MARTYPARTYMUSIC: &[&str] = &[
    "The beauty of Bitcoin is that it empowers individuals to be their own bank. No trust necessary. #BTCRevolution",
    "Just stacked more sats! Dollar cost averaging into #Bitcoin is the way. Keep building your position in sound money.",
    "People still don't realize how early we are in the Bitcoin adoption curve. Less than 2% global penetration.",
    "The Bitcoin halving is going to shock everyone who's not prepared. Supply shock incoming!",
    "True financial freedom comes from holding your own keys and being sovereign. Not your keys, not your coins. #Bitcoin",
];

const RAOULGMI: &[&str] = &[
    "Bitcoin and digital assets are the greatest growth opportunity of our lifetime. The upside is almost unquantifiable.",
    "Institutions are slowly realizing that they can't afford NOT to have Bitcoin in their portfolios. The Great Reallocation is coming.",
    "Smart money is already positioned for the next leg up in Bitcoin. Are you?",
    "The bitcoin network is becoming the world's most secure and valuable consensus network. The implications are enormous.",
    "Liquidity drives all asset prices. And the bitcoin liquidity structure is extremely bullish right now.",
];

const EXCELLION: &[&str] = &[
    "Layer 2 solutions will bring Bitcoin to billions. The base layer must remain simple and secure.",
    "Nation state Bitcoin adoption is happening faster than anyone expected. Game theory in action.",
    "Mining with renewable energy is the future of #Bitcoin - abundant energy creating sound money.",
    "Don't trust, verify. Run a node. Be sovereign. This is the way. #Bitcoin",
    "As fiat currencies continue to be debased, Bitcoin continues to shine as the hardest money ever created.",
];

const BITCOINMAGAZINE: &[&str] = &[
    "BREAKING: Major European bank launches Bitcoin custody services for institutional clients.",
    "10 years ago today, Bitcoin was trading at $250. Today it's over $100,000.",
    "El Salvador's Bitcoin strategy proves successful as tourism increases 30% year over year.",
    "MicroStrategy announces acquisition of an additional 8,420 BTC, bringing total holdings to over 200,000 bitcoin.",
    "New data from Glassnode shows Bitcoin illiquid supply has reached an all-time high of 78% of circulating supply.",
];

const REKTCAPITAL: &[&str] = &[
    "Bitcoin is looking incredibly strong on the Monthly chart. Higher lows pattern intact on the uptrend.",
    "#BTC price confirmed a breakout from this multi-month structure. Target: $125,000",
    "The $BTC Fear & Greed Index is showing Extreme Greed. Be cautious short-term, but the macro bull market remains intact.",
    "The weekly RSI on Bitcoin is NOT in overbought territory yet. Still room to grow in this rally.",
    "Bitcoin's new All-Time High will catch many investors off guard who've been waiting for a bigger dip to buy.",
];

const APOMPLIANO: &[&str] = &[
    "Bitcoin is the only truly scarce digital asset. Everything else can be replicated, copied, or outdated.",
    "The Lightning Network is growing exponentially. Bitcoin as a payment network is now a reality.",
    "More than 250 million people now have exposure to Bitcoin through ETFs. Mass adoption is coming.",
    "The Federal Reserve continues to destroy the value of the dollar. Bitcoin fixes this.",
    "Prediction: Bitcoin will be recognized as the global reserve asset by 2030.",
];

const BTC_ARCHIVE: &[&str] = &[
    "JUST IN: Switzerland approves new Bitcoin spot ETF, opening doors for broader European adoption.",
    "BREAKING: Major sovereign wealth fund reveals 1% allocation to Bitcoin, worth over $5 billion.",
    "Bitcoin miners earned over $45 million in a single day - a new all-time high.",
    "This chart shows Bitcoin adoption is growing faster than the internet did in the 1990s.",
    "Over 85% of the Bitcoin supply hasn't moved in the last 3 months. Hodlers are staying strong.",
];

/// Pool for accounts without a dedicated one
pub const GENERIC_POOL: &[&str] = &[
    "Bitcoin is the future of money. The revolution continues. #BTC",
    "Just added more Bitcoin to my long-term holdings. You should too.",
    "The fundamentals of Bitcoin have never been stronger.",
    "HODL and prosper. This is financial freedom.",
    "Sound money for a digital age. Bitcoin is inevitable.",
];

const ACCOUNT_POOLS: &[(&str, &[&str])] = &[
    ("saylor", SAYLOR),
    ("martypartymusic", MARTYPARTYMUSIC),
    ("RaoulGMI", RAOULGMI),
    ("Excellion", EXCELLION),
    ("BitcoinMagazine", BITCOINMAGAZINE),
    ("rektcapital", REKTCAPITAL),
    ("APompliano", APOMPLIANO),
    ("BTC_Archive", BTC_ARCHIVE),
];

/// Sample phrases for `account`, falling back to [`GENERIC_POOL`]
///
/// Handles match exactly, as configured.
pub fn sample_pool(account: &str) -> &'static [&'static str] {
    ACCOUNT_POOLS
        .iter()
        .find(|(handle, _)| *handle == account)
        .map(|(_, pool)| *pool)
        .unwrap_or(GENERIC_POOL)
}

/// Generate 3 to 5 posts for `account` using the thread RNG and the
/// current time
///
/// Every call re-randomizes; nothing is remembered per account.
pub fn generate_posts(account: &str) -> Vec<Post> {
    generate_posts_with(&mut rand::thread_rng(), account, Utc::now())
}

/// Generate posts with an explicit RNG and clock
pub fn generate_posts_with<R: Rng + ?Sized>(
    rng: &mut R,
    account: &str,
    now: DateTime<Utc>,
) -> Vec<Post> {
    let pool = sample_pool(account);
    let count = rng.gen_range(POSTS_PER_CALL);
    let epoch = now.timestamp();

    (0..count)
        .map(|index| {
            let hours_ago = rng.gen_range(AGE_HOURS);
            let text = pool.choose(rng).copied().unwrap_or_default();

            Post {
                id: format!("mock-{account}-{index}-{epoch}"),
                text: text.to_string(),
                created_at: now - Duration::hours(hours_ago),
                account: account.to_string(),
                metrics: PostMetrics {
                    like_count: rng.gen_range(LIKE_COUNT),
                    retweet_count: rng.gen_range(RETWEET_COUNT),
                    reply_count: rng.gen_range(REPLY_COUNT),
                },
                media_urls: Vec::new(),
            }
        })
        .collect()
}
