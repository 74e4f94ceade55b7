use colored::Colorize;
use std::rc::Rc;
use structural_patterns::composite::{client_code, client_code2, LoadCluster, LoadNode, Loader};
use structural_patterns::logging;

fn main() {
    logging::init();

    println!("{}", "Client: a simple leaf".bold());
    let simple_loader = LoadNode::new("Simple load node");
    print!("{}", client_code(&*simple_loader));

    println!("{}", "Client: a cluster".bold());
    let master_loader = LoadCluster::new("Master Loader");
    print!("{}", client_code2(&*master_loader, simple_loader.clone()));

    // Build a deeper tree and drive it through the root only.
    let session_load_cluster = LoadCluster::new("Session load cluster");
    let faults_load_cluster = LoadCluster::new("Faults load cluster");

    session_load_cluster.add_node(LoadNode::new("Session load node 1"));
    session_load_cluster.add_node(LoadNode::new("Session load node 2"));
    faults_load_cluster.add_node(LoadNode::new("Faults load node 1"));
    faults_load_cluster.add_node(LoadNode::new("Faults load node 2"));

    master_loader.add_node(session_load_cluster);
    master_loader.add_node(faults_load_cluster);

    println!("{}", "Client: the whole tree through the root, start then stop".bold());
    println!("{}", master_loader.start_load());
    println!("{}", master_loader.stop_load());

    let simple: Rc<dyn Loader> = simple_loader;
    master_loader.remove_node(&simple);
    println!("{}", "Client: the root after remove_node(\"Simple load node\")".bold());
    println!("{}", master_loader.start_load());
}
