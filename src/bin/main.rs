use owned_avl::AvlTree;

fn main() {
    let mut tree: AvlTree<u32> = AvlTree::new();

    for value in [10, 5, 15, 3, 7, 20] {
        tree.insert(value);
        tree.assert_invariants();
        println!("{:?}", tree.inorder());
    }

    println!("preorder:  {:?}", tree.preorder());
    println!("postorder: {:?}", tree.postorder());
    println!("bfs*:      {:?}", tree.bfs_order_star());

    tree.delete(&10);
    tree.assert_invariants();
    println!("{tree:?} (height {})", tree.height());

    let mut dot = String::new();
    if tree.dotgraph("demo", &mut dot).is_ok() {
        println!("{dot}");
    }
}
