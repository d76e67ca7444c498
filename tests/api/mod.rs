mod test_diagnostics;
mod test_routes;
