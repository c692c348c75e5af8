//! 结账并发压力测试
//!
//! 多线程同时结账，验证三个不变量：
//! - 不相交商品集的结账互不阻塞、全部成功
//! - 同一商品上的并发需求绝不超卖
//! - 账本与库存守恒：初始库存 = 剩余库存 + 账本中售出数量

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use pos_server::{CatalogStore, CheckoutEngine, CheckoutError, SaleLedger};
use rand::Rng;
use shared::cart::CartLine;
use shared::models::Product;

const CONTENDED_THREADS: usize = 32;
const RANDOM_ROUNDS: usize = 200;

fn product(id: &str, price: i64, stock: u32) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {}", id),
        price,
        stock,
        low_stock_threshold: 5,
        category: "Coffee".to_string(),
        image_urls: vec![],
    }
}

fn line(product_id: &str, price: i64, quantity: u32) -> CartLine {
    CartLine {
        product_id: product_id.to_string(),
        name: format!("Product {}", product_id),
        price,
        quantity,
    }
}

struct Fixture {
    _dir: tempfile::TempDir,
    catalog: CatalogStore,
    ledger: SaleLedger,
    engine: Arc<CheckoutEngine>,
}

fn fixture(products: Vec<Product>) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let catalog = CatalogStore::new();
    catalog.seed(products);
    let ledger = SaleLedger::open(dir.path().join("ledger.redb")).unwrap();
    let engine = Arc::new(CheckoutEngine::new(catalog.clone(), ledger.clone()));
    Fixture {
        _dir: dir,
        catalog,
        ledger,
        engine,
    }
}

/// 每个线程结账自己独有的商品：全部成功
#[test]
fn disjoint_product_sets_all_succeed() {
    let products: Vec<Product> = (0..8).map(|i| product(&format!("p{}", i), 250, 10)).collect();
    let fx = fixture(products);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = fx.engine.clone();
            thread::spawn(move || {
                let id = format!("p{}", i);
                engine.checkout(&[line(&id, 250, 3)])
            })
        })
        .collect();

    for handle in handles {
        let result = handle.join().unwrap();
        assert!(result.unwrap().is_some(), "disjoint checkout must succeed");
    }

    assert_eq!(fx.ledger.list().unwrap().len(), 8);
    for i in 0..8 {
        assert_eq!(fx.catalog.stock_of(&format!("p{}", i)), Some(7));
    }
}

/// 并发抢购同一商品：绝不超卖，失败方拿到当时的真实库存
#[test]
fn contended_product_never_oversells() {
    let initial_stock = 10u32;
    let per_checkout = 3u32;
    let fx = fixture(vec![product("hot", 350, initial_stock)]);

    let handles: Vec<_> = (0..CONTENDED_THREADS)
        .map(|_| {
            let engine = fx.engine.clone();
            thread::spawn(move || engine.checkout(&[line("hot", 350, per_checkout)]))
        })
        .collect();

    let mut succeeded = 0u32;
    for handle in handles {
        match handle.join().unwrap() {
            Ok(Some(_)) => succeeded += 1,
            Ok(None) => panic!("non-empty cart returned no sale"),
            Err(CheckoutError::InsufficientStock(shortage)) => {
                assert_eq!(shortage.product_id, "hot");
                assert_eq!(shortage.requested, per_checkout);
                // 失败时报告的库存必须已不足
                assert!(shortage.available < per_checkout);
            }
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    // 10 件库存、每单 3 件: 恰好 3 单成功，剩余 1 件
    assert_eq!(succeeded, initial_stock / per_checkout);
    assert_eq!(
        fx.catalog.stock_of("hot"),
        Some(initial_stock - succeeded * per_checkout)
    );
    assert_eq!(fx.ledger.list().unwrap().len(), succeeded as usize);
}

/// 随机混合负载：售出数量与账本、剩余库存守恒
#[test]
fn random_load_conserves_stock() {
    let ids = ["p1", "p2", "p3", "p4"];
    let initial: HashMap<&str, u32> = ids.iter().map(|id| (*id, 50u32)).collect();
    let products = ids.iter().map(|id| product(id, 300, initial[id])).collect();
    let fx = fixture(products);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = fx.engine.clone();
            thread::spawn(move || {
                let mut rng = rand::thread_rng();
                for _ in 0..RANDOM_ROUNDS {
                    let id = ids[rng.gen_range(0..ids.len())];
                    let quantity = rng.gen_range(1..=4);
                    // 库存耗尽后的失败是预期行为
                    let _ = engine.checkout(&[line(id, 300, quantity)]);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // 从账本回放每个商品的售出数量
    let sales = fx.ledger.list().unwrap();
    let mut sold: HashMap<String, u32> = HashMap::new();
    for sale in &sales {
        for item in &sale.items {
            *sold.entry(item.product_id.clone()).or_default() += item.quantity;
        }
    }

    for id in ids {
        let remaining = fx.catalog.stock_of(id).unwrap_or(0);
        let sold_units = sold.get(id).copied().unwrap_or(0);
        assert_eq!(
            remaining + sold_units,
            initial[id],
            "conservation violated for {}",
            id
        );
    }

    // 账本金额与条目一致
    for sale in &sales {
        let expected: i64 = sale.items.iter().map(|i| i.price * i.quantity as i64).sum();
        assert_eq!(sale.total, expected);
    }
}
